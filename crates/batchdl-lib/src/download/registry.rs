use super::types::Job;
use crate::error::RegistryError;
use std::collections::HashSet;
use std::path::{Component, Path};

/// Ordered list of accepted jobs with unique destination filenames.
///
/// Mutated only through `&mut self`, so nothing can register while a run holds
/// a shared borrow of the owning downloader.
#[derive(Debug, Default, Clone)]
pub struct JobRegistry {
    jobs: Vec<Job>,
    filenames: HashSet<String>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        url: impl Into<String>,
        filename: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let filename = filename.into();
        if !stays_inside_dest_dir(&filename) {
            return Err(RegistryError::InvalidFilename { filename });
        }
        if self.filenames.contains(&filename) {
            return Err(RegistryError::DuplicateFilename { filename });
        }

        self.filenames.insert(filename.clone());
        self.jobs.push(Job {
            url: url.into(),
            filename,
        });
        Ok(())
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Joined onto the destination directory, the name must not climb out of it or replace it.
fn stays_inside_dest_dir(filename: &str) -> bool {
    let mut has_name = false;
    for component in Path::new(filename).components() {
        match component {
            Component::Normal(_) => has_name = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    has_name
}
