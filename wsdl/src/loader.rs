use std::{
    collections::HashSet,
    fmt, fs,
    path::{Path, PathBuf},
};

use reqwest::Url;
use roxmltree::{Document, ParsingOptions};
use tracing::debug;

use crate::error::LoadError;

pub type DocumentId = usize;

/// Where a document lives: a local path or a fetchable URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    File(PathBuf),
    Url(Url),
}

impl Location {
    /// Accepts plain paths as well as `file://`, `http://` and `https://` URLs.
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        if !source.contains("://") {
            return Ok(Self::File(PathBuf::from(source)));
        }
        let url = Url::parse(source).map_err(|_| LoadError::InvalidLocation(source.into()))?;
        match url.scheme() {
            "file" => url
                .to_file_path()
                .map(Self::File)
                .map_err(|_| LoadError::InvalidLocation(source.into())),
            "http" | "https" => Ok(Self::Url(url)),
            _ => Err(LoadError::InvalidLocation(source.into())),
        }
    }

    /// Resolves a `schemaLocation` or `location` attribute against this document.
    pub fn join(&self, reference: &str) -> Result<Self, LoadError> {
        if reference.contains("://") {
            return Self::parse(reference);
        }
        match self {
            Self::File(path) => {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(Self::File(base.join(reference)))
            }
            Self::Url(url) => url
                .join(reference)
                .map(Self::Url)
                .map_err(|_| LoadError::InvalidLocation(reference.into())),
        }
    }

    /// Identity used for the loaded set; two spellings of the same file compare equal.
    fn canonical(&self) -> String {
        match self {
            Self::File(path) => fs::canonicalize(path)
                .unwrap_or_else(|_| path.clone())
                .display()
                .to_string(),
            Self::Url(url) => url.as_str().to_string(),
        }
    }

    fn fetch(&self) -> Result<String, LoadError> {
        match self {
            Self::File(path) => fs::read_to_string(path).map_err(|source| LoadError::Io {
                location: self.to_string(),
                source,
            }),
            Self::Url(url) => reqwest::blocking::get(url.clone())
                .and_then(|response| response.error_for_status())
                .and_then(|response| response.text())
                .map_err(|source| LoadError::Http {
                    location: self.to_string(),
                    source,
                }),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

#[derive(Debug)]
pub struct LoadedDocument {
    pub id: DocumentId,
    pub location: Location,
    pub text: String,
}

impl LoadedDocument {
    pub fn parse(&self, options: ParsingOptions) -> Result<Document<'_>, LoadError> {
        Document::parse_with_options(&self.text, options).map_err(|source| LoadError::Xml {
            location: self.location.to_string(),
            source,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(DocumentId),
    AlreadyLoaded,
}

/// Loads documents at most once per session.
#[derive(Debug)]
pub struct DocumentLoader {
    allow_dtd: bool,
    loaded: HashSet<String>,
    documents: Vec<LoadedDocument>,
}

impl DocumentLoader {
    pub fn new(allow_dtd: bool) -> Self {
        Self {
            allow_dtd,
            loaded: HashSet::new(),
            documents: Vec::new(),
        }
    }

    pub fn parsing_options(&self) -> ParsingOptions {
        ParsingOptions {
            allow_dtd: self.allow_dtd,
            ..ParsingOptions::default()
        }
    }

    pub fn load(&mut self, location: &Location) -> Result<LoadOutcome, LoadError> {
        // The location counts as visited even if loading fails, so a broken import is
        // reported once and import cycles terminate.
        if !self.loaded.insert(location.canonical()) {
            debug!("{location} is already loaded");
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        debug!("loading {location}");
        let document = LoadedDocument {
            id: self.documents.len(),
            location: location.clone(),
            text: location.fetch()?,
        };
        document.parse(self.parsing_options())?;

        let id = document.id;
        self.documents.push(document);
        Ok(LoadOutcome::Loaded(id))
    }

    pub fn document(&self, id: DocumentId) -> &LoadedDocument {
        &self.documents[id]
    }

    pub fn documents(&self) -> &[LoadedDocument] {
        &self.documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_paths_and_urls() {
        assert_eq!(
            Location::parse("service.wsdl").unwrap(),
            Location::File(PathBuf::from("service.wsdl"))
        );
        assert!(matches!(
            Location::parse("https://example.com/service?wsdl").unwrap(),
            Location::Url(_)
        ));
        assert!(matches!(
            Location::parse("ftp://example.com/a.xsd"),
            Err(LoadError::InvalidLocation(_))
        ));
    }

    #[test]
    fn joins_relative_references() {
        let file = Location::File(PathBuf::from("/srv/wsdl/service.wsdl"));
        assert_eq!(
            file.join("types/common.xsd").unwrap(),
            Location::File(PathBuf::from("/srv/wsdl/types/common.xsd"))
        );

        let url = Location::parse("http://example.com/api/service.wsdl").unwrap();
        assert_eq!(
            url.join("../schemas/a.xsd").unwrap().to_string(),
            "http://example.com/schemas/a.xsd"
        );
        assert_eq!(
            file.join("http://example.org/b.xsd").unwrap().to_string(),
            "http://example.org/b.xsd"
        );
    }

    #[test]
    fn second_load_is_already_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.xsd");
        fs::write(&path, "<schema/>").unwrap();

        let mut loader = DocumentLoader::new(false);
        let location = Location::File(path);
        assert_eq!(loader.load(&location).unwrap(), LoadOutcome::Loaded(0));

        let other_spelling = Location::File(dir.path().join(".").join("a.xsd"));
        assert_eq!(loader.load(&other_spelling).unwrap(), LoadOutcome::AlreadyLoaded);
        assert_eq!(loader.documents().len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let location = Location::File(dir.path().join("missing.xsd"));
        let mut loader = DocumentLoader::new(false);

        assert!(matches!(loader.load(&location), Err(LoadError::Io { .. })));
        assert_eq!(loader.load(&location).unwrap(), LoadOutcome::AlreadyLoaded);
    }

    #[test]
    fn malformed_xml_and_dtds_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.xsd");
        fs::write(&broken, "<schema>").unwrap();
        let with_dtd = dir.path().join("dtd.xsd");
        fs::write(&with_dtd, "<!DOCTYPE schema []><schema/>").unwrap();

        let mut loader = DocumentLoader::new(false);
        assert!(matches!(
            loader.load(&Location::File(broken)),
            Err(LoadError::Xml { .. })
        ));
        assert!(matches!(
            loader.load(&Location::File(with_dtd.clone())),
            Err(LoadError::Xml { .. })
        ));

        let mut permissive = DocumentLoader::new(true);
        assert!(permissive.load(&Location::File(with_dtd)).is_ok());
    }
}
