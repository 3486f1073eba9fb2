use std::error::Error;
use std::fs;

use bincode::serialize_into;
use serde::Serialize;

use crate::lms::{KneserNeyModel, LaplaceBigramModel, LaplaceUnigramModel, StupidBackoffModel};

pub trait Save {
    fn save(&self, save_path: &str) -> Result<(), Box<dyn Error>>;
}

fn save_model<M: Serialize>(model: &M, save_path: &str) -> Result<(), Box<dyn Error>> {
    let save_file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(save_path)?;
    serialize_into(&save_file, model)?;
    Ok(())
}

impl Save for LaplaceUnigramModel {
    fn save(&self, save_path: &str) -> Result<(), Box<dyn Error>> {
        save_model(self, save_path)
    }
}

impl Save for LaplaceBigramModel {
    fn save(&self, save_path: &str) -> Result<(), Box<dyn Error>> {
        save_model(self, save_path)
    }
}

impl Save for StupidBackoffModel {
    fn save(&self, save_path: &str) -> Result<(), Box<dyn Error>> {
        save_model(self, save_path)
    }
}

impl Save for KneserNeyModel {
    fn save(&self, save_path: &str) -> Result<(), Box<dyn Error>> {
        save_model(self, save_path)
    }
}
