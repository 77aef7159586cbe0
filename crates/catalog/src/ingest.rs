//! Conversion of Bangumi subjects into catalog records.
//!
//! Input is the JSON returned by `GET /v0/subjects/{id}`, one object per
//! subject, collected into an array beforehand. Tags become genres through
//! an exclusion pass (formats, regions, dates, source material, meta tags)
//! followed by a fixed normalization map onto canonical genre names.

use crate::error::Result;
use crate::store::CatalogStore;
use crate::types::{ManifestEntry, Record, SeasonKey};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use tracing::{info, warn};

/// Subset of a Bangumi subject used by the catalog
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BangumiSubject {
    pub id: Option<u64>,
    pub name: String,
    pub name_cn: String,
    pub summary: String,
    pub date: Option<String>,
    pub nsfw: bool,
    pub images: Option<BangumiImages>,
    pub rating: Option<BangumiRating>,
    pub tags: Vec<BangumiTag>,
    pub collection: HashMap<String, u64>,
    pub infobox: Vec<InfoboxItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BangumiImages {
    pub large: Option<String>,
    pub common: Option<String>,
    pub medium: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BangumiRating {
    pub score: f64,
    pub rank: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BangumiTag {
    pub name: String,
    pub count: u64,
}

/// Infobox values are either a plain string or a list of `{"v": ...}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InfoboxItem {
    pub key: String,
    pub value: Value,
}

/// Tags that are never genres
const EXCLUDED_TAGS: &[&str] = &[
    // formats
    "TV", "OVA", "OAD", "WEB", "TVA", "TV动画", "剧场版", "电影", "Movie", "Special", "特别篇",
    // regions
    "日本", "中国", "美国", "国产", "日本动画", "欧美", "韩国", "国产动画", "欧美动画",
    // year ranges
    "2020-2029", "2010-2019", "2000-2009",
    // airing slots
    "1月新番", "4月新番", "7月新番", "10月新番",
    "2024冬", "2024春", "2024夏", "2024秋",
    // source material
    "原创", "漫改", "小说改", "游戏改", "轻小说改", "漫画改", "改编", "原作", "Manga", "Light Novel",
    // meta
    "续作", "补番", "童年", "怀旧", "新番", "完结", "长篇", "短篇", "泡面番", "连载中",
];

/// Synonym to canonical genre
const GENRE_MAP: &[(&str, &str)] = &[
    ("SF", "科幻"), ("Science Fiction", "科幻"), ("科幻", "科幻"),
    ("战斗", "动作"), ("Action", "动作"), ("动作", "动作"), ("格斗", "动作"),
    ("恋爱", "爱情"), ("Romance", "爱情"), ("爱情", "爱情"), ("纯爱", "爱情"),
    ("搞笑", "喜剧"), ("Comedy", "喜剧"), ("喜剧", "喜剧"),
    ("日常", "日常"), ("Slice of Life", "日常"),
    ("校园", "校园"), ("School", "校园"), ("学园", "校园"),
    ("奇幻", "奇幻"), ("Fantasy", "奇幻"), ("异世界", "奇幻"), ("魔法", "奇幻"), ("穿越", "奇幻"),
    ("冒险", "冒险"), ("Adventure", "冒险"),
    ("悬疑", "悬疑"), ("Mystery", "悬疑"), ("推理", "悬疑"),
    ("惊悚", "惊悚"), ("Thriller", "惊悚"),
    ("恐怖", "恐怖"), ("Horror", "恐怖"),
    ("运动", "运动"), ("Sports", "运动"), ("竞技", "运动"),
    ("机战", "机战"), ("Mecha", "机战"), ("萝卜", "机战"),
    ("音乐", "音乐"), ("Music", "音乐"), ("歌舞", "音乐"), ("偶像", "音乐"),
    ("治愈", "治愈"), ("治愈系", "治愈"),
    ("致郁", "致郁"), ("致郁系", "致郁"),
    ("百合", "百合"), ("GL", "百合"),
    ("耽美", "耽美"), ("BL", "耽美"),
    ("后宫", "后宫"),
    ("逆后宫", "逆后宫"),
    ("励志", "励志"),
    ("历史", "历史"),
    ("战争", "战争"),
    ("犯罪", "犯罪"),
    ("职场", "职场"),
    ("萌", "萌系"), ("萌系", "萌系"),
];

const STUDIO_KEYS: &[&str] = &["动画制作", "制作"];
const SOURCE_KEYS: &[&str] = &["原作"];

/// Whether a tag can describe a genre at all
fn is_genre_candidate(tag: &str) -> bool {
    if EXCLUDED_TAGS.contains(&tag) {
        return false;
    }
    let has_digit = tag.chars().any(|c| c.is_ascii_digit());
    // bare years
    if tag.len() == 4 && tag.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    // year ranges
    if let Some((from, to)) = tag.split_once('-') {
        let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if numeric(from) && numeric(to) {
            return false;
        }
    }
    // month and year labels
    if has_digit && (tag.contains('月') || tag.ends_with('年')) {
        return false;
    }
    true
}

fn canonical_genre(tag: &str) -> Option<&'static str> {
    GENRE_MAP
        .iter()
        .find(|(synonym, _)| *synonym == tag)
        .map(|(_, genre)| *genre)
}

/// Canonical genres of a subject, de-duplicated and sorted
pub fn normalize_genres(tags: &[BangumiTag]) -> Vec<String> {
    tags.iter()
        .filter(|tag| tag.count > 0 && is_genre_candidate(&tag.name))
        .filter_map(|tag| canonical_genre(&tag.name))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn infobox_values(infobox: &[InfoboxItem], keys: &[&str]) -> Vec<String> {
    let mut values = Vec::new();
    for item in infobox.iter().filter(|i| keys.contains(&i.key.as_str())) {
        match &item.value {
            Value::String(s) => values.push(s.clone()),
            Value::Array(entries) => values.extend(
                entries
                    .iter()
                    .filter_map(|e| e.get("v").and_then(Value::as_str))
                    .map(str::to_string),
            ),
            _ => {}
        }
    }
    values
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

impl BangumiSubject {
    /// Map this subject onto the catalog's record shape
    pub fn into_record(self) -> Record {
        let title = if self.name_cn.is_empty() {
            self.name.clone()
        } else {
            self.name_cn.clone()
        };

        let image_url = self.images.as_ref().and_then(|images| {
            non_empty(&images.large)
                .or_else(|| non_empty(&images.common))
                .or_else(|| non_empty(&images.medium))
        });

        let rating = self.rating.unwrap_or_default();
        let year = self
            .date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse().ok());

        Record {
            id: self.id,
            title,
            title_japanese: Some(self.name),
            title_english: None,
            image_url,
            synopsis: Some(self.summary).filter(|s| !s.is_empty()),
            rating: Some(rating.score).filter(|s| *s > 0.0),
            scored_by: Some(rating.total),
            rank: Some(rating.rank),
            popularity: None,
            members: Some(self.collection.values().sum()),
            episodes: None,
            genres: normalize_genres(&self.tags),
            themes: Vec::new(),
            demographics: Vec::new(),
            studios: infobox_values(&self.infobox, STUDIO_KEYS),
            source: infobox_values(&self.infobox, SOURCE_KEYS),
            aired_from: self.date.filter(|d| !d.is_empty()),
            year,
            url: self.id.map(|id| format!("https://bgm.tv/subject/{id}")),
            is_adult_content: self.nsfw,
            is_domestic_origin: None,
        }
    }
}

/// Convert subjects to records, write the season file and update the
/// manifest. Returns the season file path, or `None` when there was
/// nothing to write.
pub fn ingest_season(
    store: &CatalogStore,
    key: SeasonKey,
    subjects: Vec<BangumiSubject>,
) -> Result<Option<PathBuf>> {
    if subjects.is_empty() {
        warn!("No subjects for {}, nothing written", key);
        return Ok(None);
    }

    // A broken manifest must fail the ingest before anything is written
    let mut manifest = store.load_manifest_or_default()?;

    let records: Vec<Record> = subjects.into_iter().map(BangumiSubject::into_record).collect();
    let path = store.write_season(key, &records)?;

    manifest.upsert(ManifestEntry {
        year: key.year,
        season: key.season,
        count: records.len(),
    });
    store.write_manifest(&manifest)?;
    info!("Updated manifest with {} ({} entries)", key, records.len());

    Ok(Some(path))
}

/// Parse a JSON array of subjects
pub fn parse_subjects(bytes: &[u8], file: &str) -> Result<Vec<BangumiSubject>> {
    serde_json::from_slice(bytes).map_err(|e| crate::error::CatalogError::MalformedJson {
        file: file.to_string(),
        reason: e.to_string(),
    })
}
