//! # Score Tables
//!
//! Read-only lookup data for `PatternEvaluator`, one set per win-length `m`.
//!
//! ## Layout on disk
//! `{dir}/m{m}/` holds five JSON objects:
//! - `codes_O.json`, `codes_X.json`: direction string → canonical code
//! - `pair_scores.json`: `"{i}:{code_i}|{j}:{code_j}"` → score, with `i < j`
//! - `lines_O.json`, `lines_X.json`: full line string → bonus
//!
//! Strings are written with the board characters `-`, `O` and `X`.
//! The tables are produced offline; this module only loads them.

use crate::core::Mark;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub type Code = u32;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed pair key '{0}'")]
    MalformedPairKey(String),
    #[error("no score tables for m = {m} under {dir}")]
    MissingTable { dir: PathBuf, m: usize },
}

/// Two (direction index, code) entries, stored with the lower index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    first: (u8, Code),
    second: (u8, Code),
}

impl PairKey {
    pub fn new(i: usize, code_i: Code, j: usize, code_j: Code) -> Self {
        let a = (i as u8, code_i);
        let b = (j as u8, code_j);
        if a.0 <= b.0 {
            PairKey { first: a, second: b }
        } else {
            PairKey { first: b, second: a }
        }
    }

    pub fn parse(text: &str) -> Result<Self, TableError> {
        let malformed = || TableError::MalformedPairKey(text.to_string());
        let entry = |part: &str| -> Result<(usize, Code), TableError> {
            let (dir, code) = part.split_once(':').ok_or_else(malformed)?;
            let dir: usize = dir.trim().parse().map_err(|_| malformed())?;
            let code: Code = code.trim().parse().map_err(|_| malformed())?;
            if dir >= 8 {
                return Err(malformed());
            }
            Ok((dir, code))
        };

        let (left, right) = text.split_once('|').ok_or_else(malformed)?;
        let (i, code_i) = entry(left)?;
        let (j, code_j) = entry(right)?;
        if i == j {
            return Err(malformed());
        }
        Ok(PairKey::new(i, code_i, j, code_j))
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}|{}:{}",
            self.first.0, self.first.1, self.second.0, self.second.1
        )
    }
}

#[derive(Debug, Clone)]
pub struct ScoreTables {
    m: usize,
    codes: [HashMap<String, Code>; 2],
    pairs: HashMap<PairKey, f64>,
    lines: [HashMap<String, f64>; 2],
}

static TABLE_CACHE: Lazy<Mutex<HashMap<(PathBuf, usize), Arc<ScoreTables>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn table_path(dir: &Path, m: usize, name: &str) -> PathBuf {
    dir.join(format!("m{}", m)).join(name)
}

fn per_mark(prefix: &str, mark: Mark) -> String {
    format!("{}_{}.json", prefix, mark)
}

fn read_map<V: serde::de::DeserializeOwned>(path: &Path) -> Result<HashMap<String, V>, TableError> {
    let text = fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| TableError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_map<V: serde::Serialize>(path: &Path, map: &HashMap<String, V>) -> Result<(), TableError> {
    let text = serde_json::to_string(map).map_err(|source| TableError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl ScoreTables {
    /// Builds tables from in-memory maps. Pair keys use the on-disk text form.
    pub fn from_maps(
        m: usize,
        codes_o: HashMap<String, Code>,
        codes_x: HashMap<String, Code>,
        pairs: HashMap<String, f64>,
        lines_o: HashMap<String, f64>,
        lines_x: HashMap<String, f64>,
    ) -> Result<Self, TableError> {
        let pairs = pairs
            .into_iter()
            .map(|(key, score)| Ok((PairKey::parse(&key)?, score)))
            .collect::<Result<HashMap<_, _>, TableError>>()?;
        Ok(ScoreTables {
            m,
            codes: [codes_o, codes_x],
            pairs,
            lines: [lines_o, lines_x],
        })
    }

    /// Reads the five tables for win-length `m` below `dir`.
    pub fn load(dir: &Path, m: usize) -> Result<Self, TableError> {
        if !dir.join(format!("m{}", m)).is_dir() {
            return Err(TableError::MissingTable {
                dir: dir.to_path_buf(),
                m,
            });
        }
        Self::from_maps(
            m,
            read_map(&table_path(dir, m, &per_mark("codes", Mark::O)))?,
            read_map(&table_path(dir, m, &per_mark("codes", Mark::X)))?,
            read_map(&table_path(dir, m, "pair_scores.json"))?,
            read_map(&table_path(dir, m, &per_mark("lines", Mark::O)))?,
            read_map(&table_path(dir, m, &per_mark("lines", Mark::X)))?,
        )
    }

    /// Loads each (directory, m) once per process and shares the result.
    pub fn load_cached(dir: &Path, m: usize) -> Result<Arc<Self>, TableError> {
        let key = (dir.to_path_buf(), m);
        let mut cache = TABLE_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(tables) = cache.get(&key) {
            return Ok(Arc::clone(tables));
        }
        let tables = Arc::new(Self::load(dir, m)?);
        log::info!(
            "loaded score tables for m = {} from {} ({} pair entries)",
            m,
            dir.display(),
            tables.pairs.len()
        );
        cache.insert(key, Arc::clone(&tables));
        Ok(tables)
    }

    /// Writes the tables in the layout `load` expects.
    pub fn save(&self, dir: &Path) -> Result<(), TableError> {
        let sub = dir.join(format!("m{}", self.m));
        fs::create_dir_all(&sub).map_err(|source| TableError::Io {
            path: sub.clone(),
            source,
        })?;
        for mark in Mark::PLAYERS {
            let slot = Self::slot(mark);
            write_map(&table_path(dir, self.m, &per_mark("codes", mark)), &self.codes[slot])?;
            write_map(&table_path(dir, self.m, &per_mark("lines", mark)), &self.lines[slot])?;
        }
        let pairs: HashMap<String, f64> = self
            .pairs
            .iter()
            .map(|(key, &score)| (key.to_string(), score))
            .collect();
        write_map(&table_path(dir, self.m, "pair_scores.json"), &pairs)
    }

    fn slot(mark: Mark) -> usize {
        mark.player_index().unwrap_or(0)
    }

    pub fn m(&self) -> usize {
        self.m
    }

    /// Canonical code of a direction string in `mark`'s dictionary.
    pub fn code(&self, mark: Mark, direction: &str) -> Option<Code> {
        self.codes[Self::slot(mark)].get(direction).copied()
    }

    pub fn pair_score(&self, key: &PairKey) -> f64 {
        self.pairs.get(key).copied().unwrap_or(0.0)
    }

    /// Straight-line bonus; lines absent from the table are worth 0.
    pub fn line_bonus(&self, mark: Mark, line: &str) -> f64 {
        self.lines[Self::slot(mark)].get(line).copied().unwrap_or(0.0)
    }
}
