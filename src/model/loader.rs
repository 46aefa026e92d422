use super::{Archetype, Question, TraitCatalog};
use crate::error::{TfResult, TraitForgeError};
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

fn read_json<T: DeserializeOwned, R: Read>(reader: R) -> TfResult<T> {
    Ok(serde_json::from_reader(BufReader::new(reader))?)
}

pub fn load_questions<R: Read>(reader: R) -> TfResult<Vec<Question>> {
    let questions: Vec<Question> = read_json(reader)?;
    for (i, q) in questions.iter().enumerate() {
        if q.answers.is_empty() {
            debug!("Question {} ('{}') has no answers", i + 1, q.prompt);
        }
    }
    Ok(questions)
}

pub fn load_archetypes<R: Read>(reader: R) -> TfResult<Vec<Archetype>> {
    let archetypes: Vec<Archetype> = read_json(reader)?;
    let mut seen = std::collections::HashSet::new();
    for a in &archetypes {
        if !seen.insert(a.name.as_str()) {
            return Err(TraitForgeError::Validation(format!(
                "Duplicate archetype name '{}'",
                a.name
            )));
        }
    }
    Ok(archetypes)
}

pub fn load_traits<R: Read>(reader: R) -> TfResult<TraitCatalog> {
    read_json(reader)
}

pub fn load_questions_from_file<P: AsRef<Path>>(path: P) -> TfResult<Vec<Question>> {
    let path = path.as_ref();
    let questions = load_questions(File::open(path)?)?;
    info!("📂 Loaded {} questions from {:?}", questions.len(), path);
    Ok(questions)
}

pub fn load_archetypes_from_file<P: AsRef<Path>>(path: P) -> TfResult<Vec<Archetype>> {
    let path = path.as_ref();
    let archetypes = load_archetypes(File::open(path)?)?;
    info!("📂 Loaded {} archetypes from {:?}", archetypes.len(), path);
    Ok(archetypes)
}

pub fn load_traits_from_file<P: AsRef<Path>>(path: P) -> TfResult<TraitCatalog> {
    let path = path.as_ref();
    let catalog = load_traits(File::open(path)?)?;
    info!("📂 Loaded metadata for {} traits from {:?}", catalog.len(), path);
    Ok(catalog)
}

/// Writes the bank as pretty-printed JSON, the same layout it is read from.
pub fn save_questions<P: AsRef<Path>>(path: P, questions: &[Question]) -> TfResult<()> {
    let mut json = serde_json::to_string_pretty(questions)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}
