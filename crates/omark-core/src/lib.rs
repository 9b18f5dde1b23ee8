pub mod logging;

// Core modules
pub mod confirm;
pub mod graphql;
pub mod intercept;
pub mod marker;
pub mod playback;
pub mod timestamp;
pub mod transport;
pub mod trigger;
