pub mod decrypt;
pub mod encrypt;
pub mod inspect;
pub mod keys;
pub mod sign;
pub mod verify;
pub mod which;
