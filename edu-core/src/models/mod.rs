mod cart_line;
mod pass;
mod qna;
mod service;
mod subject;
mod user_profile;

pub use cart_line::{CartLine, CartLineView, CheckoutLine};
pub use pass::{Pass, PassIcon};
pub use qna::QnaEntry;
pub use service::Service;
pub use subject::{SubjectCategory, SubjectDetail};
pub use user_profile::{ProfileField, UserProfile};
