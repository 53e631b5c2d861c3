//! Font library and remote font isolation
//!
//! Fonts for rasterized text come exclusively from a locally configured
//! directory. During export the library additionally suppresses remote
//! font-face resolution behind a drop guard, so a slow or unreachable font
//! CDN can never stall or restyle the captured artifact. The guard re-enables
//! remote lookup on every exit path.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use rusttype::Font;
use tracing::{debug, warn};

/// Locally loaded fonts, keyed by lowercase file stem
pub struct FontLibrary {
    fonts: HashMap<String, Font<'static>>,
    /// First successfully loaded font, used when no family matches
    default_key: Option<String>,
    remote_enabled: AtomicBool,
}

impl FontLibrary {
    /// Empty library; text nodes are skipped during rasterization
    pub fn empty() -> Self {
        Self {
            fonts: HashMap::new(),
            default_key: None,
            remote_enabled: AtomicBool::new(true),
        }
    }

    /// Load every `.ttf`/`.otf` file from the directory
    ///
    /// Unreadable or unparseable files are skipped with a warning; an empty
    /// or missing directory yields an empty library and degraded (text-free)
    /// renders rather than an error.
    pub fn load(dir: Option<&Path>) -> Self {
        let mut library = Self::empty();
        let Some(dir) = dir else {
            return library;
        };
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "Font directory unreadable, rendering without text");
                return library;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
                .unwrap_or(false);
            if !is_font {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let key = stem.to_ascii_lowercase();
            match std::fs::read(&path) {
                Ok(bytes) => match Font::try_from_vec(bytes) {
                    Some(font) => {
                        debug!(font = %key, "Loaded font");
                        if library.default_key.is_none() {
                            library.default_key = Some(key.clone());
                        }
                        library.fonts.insert(key, font);
                    }
                    None => warn!(path = %path.display(), "Skipping unparseable font file"),
                },
                Err(err) => warn!(path = %path.display(), error = %err, "Skipping unreadable font file"),
            }
        }
        library
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Resolve a font for the requested family
    ///
    /// Matches on file stem first. Unmatched families are left to the
    /// viewer's own (possibly remote) font faces while remote resolution is
    /// enabled; while suppressed for export they substitute the first loaded
    /// local font instead, so painted text can never depend on a font CDN.
    pub fn resolve(&self, family: &str) -> Option<&Font<'static>> {
        let key = family.to_ascii_lowercase();
        if let Some(font) = self.fonts.get(&key) {
            return Some(font);
        }
        if self.remote_enabled() {
            return None;
        }
        self.default_key.as_ref().and_then(|k| self.fonts.get(k))
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote_enabled.load(Ordering::SeqCst)
    }

    /// Disable remote font-face resolution until the guard drops
    pub fn suppress_remote(&self) -> RemoteFontIsolation<'_> {
        self.remote_enabled.store(false, Ordering::SeqCst);
        debug!("Remote font resolution suspended for export");
        RemoteFontIsolation { library: self }
    }
}

/// Drop guard that re-enables remote font resolution
pub struct RemoteFontIsolation<'a> {
    library: &'a FontLibrary,
}

impl Drop for RemoteFontIsolation<'_> {
    fn drop(&mut self) {
        self.library.remote_enabled.store(true, Ordering::SeqCst);
        debug!("Remote font resolution restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir() -> &'static Path {
        Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/fonts"))
    }

    #[test]
    fn test_empty_library_resolves_nothing() {
        let library = FontLibrary::empty();
        assert!(library.is_empty());
        assert!(library.resolve("serif").is_none());
    }

    #[test]
    fn test_load_reads_faces_by_stem() {
        let library = FontLibrary::load(Some(fixture_dir()));
        assert!(!library.is_empty());
        assert!(library.resolve("dejavusans").is_some());
        assert!(library.resolve("DejaVuSans").is_some());
    }

    #[test]
    fn test_unmatched_family_substitutes_only_while_suppressed() {
        let library = FontLibrary::load(Some(fixture_dir()));
        // Interactive path: unmatched families stay with the viewer's faces
        assert!(library.resolve("cursive").is_none());
        {
            let _guard = library.suppress_remote();
            // Export path: everything maps onto a local face
            assert!(library.resolve("cursive").is_some());
        }
        assert!(library.resolve("cursive").is_none());
    }

    #[test]
    fn test_missing_directory_yields_empty_library() {
        let library = FontLibrary::load(Some(Path::new("/nonexistent/fonts")));
        assert!(library.is_empty());
    }

    #[test]
    fn test_isolation_guard_restores_on_drop() {
        let library = FontLibrary::empty();
        assert!(library.remote_enabled());
        {
            let _guard = library.suppress_remote();
            assert!(!library.remote_enabled());
        }
        assert!(library.remote_enabled());
    }

    #[test]
    fn test_isolation_guard_restores_on_early_return() {
        fn inner(library: &FontLibrary) -> Result<(), ()> {
            let _guard = library.suppress_remote();
            Err(())
        }
        let library = FontLibrary::empty();
        let _ = inner(&library);
        assert!(library.remote_enabled());
    }
}
