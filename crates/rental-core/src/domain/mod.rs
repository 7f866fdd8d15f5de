//! 주택 임대 서비스의 도메인 모델.

mod house;
mod user;
mod validation;

pub use house::*;
pub use user::*;
pub use validation::*;
