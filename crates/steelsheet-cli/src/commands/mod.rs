pub mod extract;
pub mod inspect;
