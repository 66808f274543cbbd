pub mod completions;
pub mod curve;
pub mod reference;
pub mod run;
pub mod util;
pub mod validate;
