//! Social identity providers

pub mod kakao;

pub use kakao::KakaoIdentityProvider;
