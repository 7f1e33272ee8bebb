// Authoring defaults shared by the core and the native front-end.

// Recording window
pub const RECORDING_LENGTH_SEC: f32 = 5.0; // also becomes the particle start lifetime
pub const TICK_INTERVAL_SEC: f32 = 0.2; // time between recorded snapshots
pub const TICK_BUDGET_EPSILON: f32 = 1e-4; // length/interval ratios this close to an integer round
pub const MAX_TICK_BUDGET: usize = 1_000_000; // longest window a session will accept, in ticks
pub const MAX_PREALLOCATED_TICKS: usize = 4096; // series grow past this on demand

// Pre-roll countdown
pub const PRE_ROLL_SECONDS: u32 = 4;
pub const PRE_ROLL_FIRST_DELAY_SEC: f32 = 0.5; // delay before the first countdown message
pub const PRE_ROLL_PERIOD_SEC: f32 = 1.0;

// Tracked points
pub const SIZE_NODE_INDEX: usize = 2; // middle fingertip when nodes are thumb..pinky
pub const SNAPSHOT_INLINE_POINTS: usize = 8; // points held without heap allocation

// Centroid divisor is `count - LEGACY_CENTROID_DIVISOR_OFFSET` in legacy mode
pub const LEGACY_CENTROID_DIVISOR_OFFSET: usize = 1;

// Curve fitting
pub const INTERPOLATION_SLICES: usize = 3;
pub const SIMULATION_SCALE: f32 = 10.0; // velocity keys
pub const SIZE_OVER_LIFETIME_SCALE: f32 = 1.0;
pub const NOISE_SCALE: f32 = 1.0;

// Particle module defaults
pub const NOISE_FREQUENCY: f32 = 12.0;
pub const CURVE_MULTIPLIER: f32 = 1.0; // MinMaxCurve scalar applied over each curve
