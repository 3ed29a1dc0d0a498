pub mod decode;
pub mod model;
pub mod util;
