mod pokemon;

pub use pokemon::*;
