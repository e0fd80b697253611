pub mod formats;
pub mod scanner;
