use chrono::NaiveDate;

/// Identity provider a user signed up through (e.g. "kakao")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialPlatform {
    pub id: i32,
    pub name: String,
}

impl SocialPlatform {
    pub const KAKAO: &'static str = "kakao";
}

/// User model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub phone_number: Option<String>,
    pub profile_image: String,
    pub date_of_birth: Option<NaiveDate>,
    pub social_platform_id: i32,
}

/// Fields used when a social login sees an email for the first time.
#[derive(Debug, Clone)]
pub struct NewSocialUser {
    pub email: String,
    pub name: String,
    pub profile_image: String,
    pub social_platform_id: i32,
}
