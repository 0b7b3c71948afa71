// Playfield and agent constants shared by the encoder, the environment and the CLI

//---------------------------------------------------------------------
// Playfield Geometry (pixels)
//---------------------------------------------------------------------
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const PADDLE_WIDTH: f32 = 100.0;
pub const PADDLE_HEIGHT: f32 = 20.0;
pub const PADDLE_BOTTOM_MARGIN: f32 = 40.0;
pub const BALL_RADIUS: f32 = 8.0;

//---------------------------------------------------------------------
// Brick Grid
//---------------------------------------------------------------------
pub const BRICK_ROWS: usize = 5;
pub const BRICK_COLS: usize = 10;
pub const BRICK_WIDTH: f32 = 70.0;
pub const BRICK_HEIGHT: f32 = 20.0;
pub const BRICK_SPACING: f32 = 4.0;
pub const BRICK_TOP_OFFSET: f32 = 60.0;
pub const BRICK_SCORE: u32 = 10;

//---------------------------------------------------------------------
// Motion (pixels per second)
//---------------------------------------------------------------------
pub const PADDLE_SPEED: f32 = 450.0;
pub const BALL_LAUNCH_SPEED_Y: f32 = 240.0;
pub const BALL_LAUNCH_SPREAD_X: f32 = 240.0;
pub const PADDLE_DEFLECTION_SPEED: f32 = 300.0;
pub const TICK_DT: f32 = 1.0 / 60.0;

//---------------------------------------------------------------------
// State Discretization
//---------------------------------------------------------------------
pub const PADDLE_X_BINS: usize = 12;
pub const BALL_X_BINS: usize = 12;
pub const BALL_Y_BINS: usize = 16;
pub const BALL_VX_BINS: usize = 3;
pub const BALL_VY_BINS: usize = 3;
pub const VELOCITY_DEADBAND: f32 = 10.0;

pub const N_STATES: usize = PADDLE_X_BINS * BALL_X_BINS * BALL_Y_BINS * BALL_VX_BINS * BALL_VY_BINS;

//---------------------------------------------------------------------
// Episode Limits
//---------------------------------------------------------------------
/// Ticks after which a rally is truncated (about five minutes at 60 Hz)
pub const DEFAULT_MAX_STEPS_PER_EPISODE: u32 = 18_000;
