pub mod health;
pub use self::health::health;

pub mod root;
pub use self::root::root;

pub mod signup;
pub use self::signup::signup;
