use serde::{Deserialize, Deserializer, Serialize};

/// The signed-in student's profile.
///
/// One record exists per session. `grade` and `score` are kept as text: the
/// profile editor stores whatever the user typed, and older records carry
/// them as JSON numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub profile_name: String,
    pub profile_color: String,
    pub high_school: String,
    #[serde(deserialize_with = "string_or_number")]
    pub grade: String,
    #[serde(deserialize_with = "string_or_number")]
    pub score: String,
    #[serde(default)]
    pub dream: String,
}

/// Editable fields of a [`UserProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    ProfileName,
    ProfileColor,
    HighSchool,
    Grade,
    Score,
    Dream,
}

impl ProfileField {
    pub fn all() -> &'static [ProfileField] {
        &[
            ProfileField::Username,
            ProfileField::ProfileName,
            ProfileField::ProfileColor,
            ProfileField::HighSchool,
            ProfileField::Grade,
            ProfileField::Score,
            ProfileField::Dream,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Username => "이름",
            ProfileField::ProfileName => "프로필 이름",
            ProfileField::ProfileColor => "프로필 색상",
            ProfileField::HighSchool => "고등학교",
            ProfileField::Grade => "학년",
            ProfileField::Score => "등급",
            ProfileField::Dream => "꿈",
        }
    }
}

impl UserProfile {
    pub fn field(
        &self,
        field: ProfileField,
    ) -> &str {
        match field {
            ProfileField::Username => &self.username,
            ProfileField::ProfileName => &self.profile_name,
            ProfileField::ProfileColor => &self.profile_color,
            ProfileField::HighSchool => &self.high_school,
            ProfileField::Grade => &self.grade,
            ProfileField::Score => &self.score,
            ProfileField::Dream => &self.dream,
        }
    }

    pub fn set_field(
        &mut self,
        field: ProfileField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match field {
            ProfileField::Username => self.username = value,
            ProfileField::ProfileName => self.profile_name = value,
            ProfileField::ProfileColor => self.profile_color = value,
            ProfileField::HighSchool => self.high_school = value,
            ProfileField::Grade => self.grade = value,
            ProfileField::Score => self.score = value,
            ProfileField::Dream => self.dream = value,
        }
    }

    /// One-line summary shown under the username, e.g. `한국고 2학년 3등급`.
    pub fn school_line(&self) -> String {
        format!("{} {}학년 {}등급", self.high_school, self.grade, self.score)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}
