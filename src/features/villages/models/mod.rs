mod village;

pub use village::Village;
