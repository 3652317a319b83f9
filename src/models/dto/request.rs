use serde::Deserialize;
use validator::Validate;

use crate::errors::AppResult;
use crate::models::domain::OptionKey;

#[derive(Debug, Clone, Deserialize)]
pub struct SetTopicRequest {
    pub topic: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetAnswerRequest {
    pub question_index: usize,

    #[validate(length(equal = 1, message = "option must be a single letter A-D"))]
    pub option: String,
}

impl SetAnswerRequest {
    pub fn option_key(&self) -> AppResult<OptionKey> {
        self.validate()?;
        self.option.parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetUserNameRequest {
    pub user_name: String,
}
