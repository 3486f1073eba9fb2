use std::error::Error;
use std::fs;

use bincode::deserialize_from;
use serde::de::DeserializeOwned;

use crate::lms::{KneserNeyModel, LaplaceBigramModel, LaplaceUnigramModel, StupidBackoffModel};

pub trait Load {
    fn load(load_path: &str) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

// load_path should be a file written by `Save` for the same model type.
fn load_model<M: DeserializeOwned>(load_path: &str) -> Result<M, Box<dyn Error>> {
    let file = fs::OpenOptions::new().read(true).open(load_path)?;
    Ok(deserialize_from(&file)?)
}

impl Load for LaplaceUnigramModel {
    fn load(load_path: &str) -> Result<Self, Box<dyn Error>> {
        load_model(load_path)
    }
}

impl Load for LaplaceBigramModel {
    fn load(load_path: &str) -> Result<Self, Box<dyn Error>> {
        load_model(load_path)
    }
}

impl Load for StupidBackoffModel {
    fn load(load_path: &str) -> Result<Self, Box<dyn Error>> {
        load_model(load_path)
    }
}

impl Load for KneserNeyModel {
    fn load(load_path: &str) -> Result<Self, Box<dyn Error>> {
        load_model(load_path)
    }
}
