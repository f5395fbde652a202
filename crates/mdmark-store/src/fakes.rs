//! Deterministic stand-ins for the host and the file system.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use mdmark_core::{
    ActiveDocument, FileStore, MdmarkError, Notifier, Picker, Prompt, Result, SessionState,
    SourceLocation, TextPrompt,
};

/// In-memory file system that counts every mutation.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    pub dirs: BTreeSet<PathBuf>,
    pub files: BTreeMap<PathBuf, String>,
    pub mutations: usize,
    pub dir_creations: usize,
    pub fail_writes: bool,
}

impl MemoryFileStore {
    pub fn with_notes(dir: &Path, notes: &[(&str, &str)]) -> Self {
        let mut store = Self::default();
        store.dirs.insert(dir.to_path_buf());
        for (name, content) in notes {
            store
                .files
                .insert(dir.join(format!("{name}.md")), (*content).to_string());
        }
        store
    }

    fn check_writable(&self) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        Ok(())
    }
}

impl FileStore for MemoryFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.contains(path) || self.files.contains_key(path)
    }

    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        self.check_writable()?;
        self.mutations += 1;
        self.dir_creations += 1;
        self.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
        if !self.dirs.contains(dir) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }
        Ok(self
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter_map(|path| path.file_name()?.to_str().map(str::to_owned))
            .collect())
    }

    fn create_new(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        self.check_writable()?;
        if self.exists(path) {
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, "exists"));
        }
        self.mutations += 1;
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn append(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        self.check_writable()?;
        let file = self
            .files
            .get_mut(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))?;
        self.mutations += 1;
        file.push_str(contents);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
    }
}

/// Session whose writes always fail.
#[derive(Debug, Default)]
pub struct ReadOnlySession;

impl SessionState for ReadOnlySession {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(MdmarkError::Session("read-only".to_string()))
    }
}

/// Scripted host: answers come from queues, messages are recorded.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub answers: VecDeque<Option<String>>,
    pub picks: VecDeque<Option<usize>>,
    pub location: Option<SourceLocation>,
    pub prompts: Vec<(String, String)>,
    pub pick_lists: Vec<Vec<String>>,
    pub infos: Vec<String>,
    pub errors: Vec<String>,
}

impl FakeHost {
    pub fn answering(answers: &[Option<&str>]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.map(str::to_owned)).collect(),
            ..Self::default()
        }
    }

    pub fn picking(mut self, picks: &[Option<usize>]) -> Self {
        self.picks = picks.iter().copied().collect();
        self
    }

    pub fn at(mut self, path: &str, line: u32) -> Self {
        self.location = Some(SourceLocation {
            path: PathBuf::from(path),
            line: NonZeroU32::new(line).unwrap(),
        });
        self
    }
}

impl TextPrompt for FakeHost {
    fn ask(&mut self, prompt: Prompt<'_>) -> Option<String> {
        self.prompts
            .push((prompt.message.to_string(), prompt.default.to_string()));
        self.answers.pop_front().flatten()
    }
}

impl Picker for FakeHost {
    fn pick(&mut self, _placeholder: &str, items: &[String]) -> Option<usize> {
        self.pick_lists.push(items.to_vec());
        self.picks.pop_front().flatten()
    }
}

impl ActiveDocument for FakeHost {
    fn location(&self) -> Option<SourceLocation> {
        self.location.clone()
    }
}

impl Notifier for FakeHost {
    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
