use serde::{de, Deserialize, Deserializer};

use crate::model::{batch::BatchEntry, score::Score};

/// Both providers speak the legacy "peppy api" dialect in which numeric
/// fields may arrive as strings. These helpers accept either form.
fn num_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + Deserialize<'de>,
    T::Err: std::fmt::Display
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Num(T),
        Str(String)
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(value) => Ok(value),
        Raw::Str(text) => text.parse().map_err(de::Error::custom)
    }
}

fn opt_num_or_string<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr + Deserialize<'de>,
    T::Err: std::fmt::Display
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Num(T),
        Str(String)
    }

    match Option::<Raw<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(value)) => Ok(Some(value)),
        Some(Raw::Str(text)) => text.parse().map(Some).map_err(de::Error::custom)
    }
}

/// One entry of a `get_user_best` response.
#[derive(Debug, Deserialize)]
pub struct UserBestScore {
    #[serde(deserialize_with = "num_or_string")]
    pub beatmap_id: i32,
    #[serde(deserialize_with = "num_or_string")]
    pub score: i64,
    #[serde(rename = "count300", deserialize_with = "num_or_string")]
    pub count_300: u32,
    #[serde(rename = "count100", deserialize_with = "num_or_string")]
    pub count_100: u32,
    #[serde(rename = "count50", deserialize_with = "num_or_string")]
    pub count_50: u32,
    #[serde(rename = "countmiss", deserialize_with = "num_or_string")]
    pub count_miss: u32,
    #[serde(rename = "maxcombo", deserialize_with = "num_or_string")]
    pub max_combo: u32,
    #[serde(rename = "enabled_mods", deserialize_with = "num_or_string")]
    pub mods: u32,
    #[serde(default, deserialize_with = "opt_num_or_string")]
    pub pp: Option<f64>
}

impl UserBestScore {
    pub fn to_entry(&self, player_id: i32, player_name: &str) -> BatchEntry {
        BatchEntry {
            beatmap_id: self.beatmap_id,
            score: Score {
                beatmap_id: self.beatmap_id,
                player_id,
                player_name: player_name.to_string(),
                total_score: self.score,
                count_300: self.count_300,
                count_100: self.count_100,
                count_50: self.count_50,
                count_miss: self.count_miss,
                max_combo: self.max_combo,
                mods: self.mods,
                pp: self.pp.unwrap_or(0.0)
            }
        }
    }
}

/// Ripple `/v1/users/full` response, trimmed to the fields the processor
/// reads.
#[derive(Debug, Deserialize)]
pub struct RippleUserFull {
    pub id: i32,
    pub username: String,
    pub std: RippleModeStats
}

#[derive(Debug, Deserialize)]
pub struct RippleModeStats {
    #[serde(deserialize_with = "num_or_string")]
    pub pp: f64
}

/// Bancho `/get_user` response entry.
#[derive(Debug, Deserialize)]
pub struct BanchoUser {
    #[serde(deserialize_with = "num_or_string")]
    pub user_id: i32,
    pub username: String,
    #[serde(rename = "pp_raw", default, deserialize_with = "opt_num_or_string")]
    pub pp: Option<f64>
}
