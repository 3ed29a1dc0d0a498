use serde::{Deserialize, Serialize};

use crate::model::Extra;
use crate::util::markers::UserId;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
    #[serde(flatten)]
    pub extra: Extra,
}
