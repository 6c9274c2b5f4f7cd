pub mod persona;
pub mod roadmap;
pub mod survey;
