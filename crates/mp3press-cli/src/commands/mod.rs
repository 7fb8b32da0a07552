pub mod encode;
pub mod info;
pub mod wav;
