pub mod animation;
pub mod decode;
