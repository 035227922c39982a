/*!
 * EPUB container handling.
 *
 * An EPUB is a zip archive with a `mimetype` entry, a
 * `META-INF/container.xml` pointing at the OPF package document, and a
 * spine listing the reading-order content documents. This module loads
 * the archive into memory, exposes the spine's XHTML documents as
 * chapters with readable/writable byte content, and writes the mutated
 * bundle back out with the `mimetype` entry stored first and
 * uncompressed, as the format requires.
 */

use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::io::{Read, Seek, Write};
use std::path::Path;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::errors::BookError;

const MIMETYPE_PATH: &str = "mimetype";
const CONTAINER_PATH: &str = "META-INF/container.xml";
const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";

/// One spine document of the book
pub struct Chapter {
    /// Archive path of the document
    pub href: String,
    /// Raw XHTML bytes, UTF-8
    pub content: Vec<u8>,
}

/// An EPUB bundle loaded into memory
pub struct Book {
    /// Spine documents in reading order
    pub chapters: Vec<Chapter>,
    /// Every other archive entry except the mimetype, in archive order
    resources: Vec<(String, Vec<u8>)>,
}

impl Book {
    /// Open an EPUB file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BookError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Read an EPUB from any `Read + Seek` source
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self, BookError> {
        let mut archive = ZipArchive::new(reader)?;

        // Load every entry up front; chapters are extracted below
        let mut entries: Vec<(String, Vec<u8>)> = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            entries.push((file.name().to_string(), data));
        }

        let container = entry_text(&entries, CONTAINER_PATH)?;
        let opf_path = find_opf_path(&container)?;
        let opf_dir = Path::new(&opf_path)
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        let opf_content = entry_text(&entries, &opf_path)?;
        let (manifest, spine_ids) = parse_opf(&opf_content)?;

        // Resolve the spine's XHTML documents to archive paths, in order
        let mut chapter_paths: Vec<String> = Vec::new();
        for id in &spine_ids {
            if let Some((href, media_type)) = manifest.get(id) {
                if media_type == XHTML_MEDIA_TYPE {
                    chapter_paths.push(resolve_path(&opf_dir, href));
                }
            }
        }

        let mut resources: Vec<(String, Vec<u8>)> = Vec::new();
        let mut chapter_data: HashMap<String, Vec<u8>> = HashMap::new();

        for (name, data) in entries {
            if name == MIMETYPE_PATH {
                continue;
            }
            if chapter_paths.contains(&name) {
                chapter_data.insert(name, data);
            } else {
                resources.push((name, data));
            }
        }

        // Chapters come out in spine order, not archive order; spine items
        // missing from the archive are tolerated and skipped
        let mut chapters: Vec<Chapter> = Vec::with_capacity(chapter_paths.len());
        for path in chapter_paths {
            if let Some(content) = chapter_data.remove(&path) {
                chapters.push(Chapter { href: path, content });
            }
        }

        Ok(Self { chapters, resources })
    }

    /// Number of chapters in the spine
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Write the bundle to a file on disk
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BookError> {
        let file = std::fs::File::create(path)?;
        self.save_to_writer(file)
    }

    /// Write the bundle to any `Write + Seek` destination.
    ///
    /// The mimetype entry comes first and uncompressed; everything else
    /// is deflated.
    pub fn save_to_writer<W: Write + Seek>(&self, writer: W) -> Result<(), BookError> {
        let mut zip = ZipWriter::new(writer);

        let options_stored =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        let options_deflate =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file(MIMETYPE_PATH, options_stored)?;
        zip.write_all(b"application/epub+zip")?;

        for (name, data) in &self.resources {
            zip.start_file(name.as_str(), options_deflate)?;
            zip.write_all(data)?;
        }

        for chapter in &self.chapters {
            zip.start_file(chapter.href.as_str(), options_deflate)?;
            zip.write_all(&chapter.content)?;
        }

        zip.finish()?;
        Ok(())
    }
}

fn entry_text(entries: &[(String, Vec<u8>)], name: &str) -> Result<String, BookError> {
    let data = entries.iter()
        .find(|(entry_name, _)| entry_name == name)
        .map(|(_, data)| data.clone())
        .ok_or_else(|| BookError::InvalidEpub(format!("missing archive entry: {}", name)))?;
    Ok(String::from_utf8(data)?)
}

/// Strip an XML name down to its local part
fn local_name(name: &[u8]) -> &[u8] {
    name.rsplit(|&b| b == b':').next().unwrap_or(name)
}

fn find_opf_path(container: &str) -> Result<String, BookError> {
    let mut reader = Reader::from_str(container);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if local_name(e.name().as_ref()) == b"rootfile" =>
            {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"full-path" {
                        return Ok(String::from_utf8(attr.value.to_vec())?);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(BookError::Xml(e)),
            _ => {}
        }
    }

    Err(BookError::InvalidEpub(
        "No rootfile found in container.xml".into(),
    ))
}

/// Parse the OPF into a manifest map (id -> (href, media-type)) and the
/// ordered spine idrefs
fn parse_opf(
    content: &str,
) -> Result<(HashMap<String, (String, String)>, Vec<String>), BookError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut manifest: HashMap<String, (String, String)> = HashMap::new();
    let mut spine_ids: Vec<String> = Vec::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => return Err(BookError::Xml(e)),
        };

        match event {
            Event::Empty(e) | Event::Start(e) => match local_name(e.name().as_ref()) {
                b"item" => {
                    let mut id = String::new();
                    let mut href = String::new();
                    let mut media_type = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"id" => id = String::from_utf8(attr.value.to_vec())?,
                            b"href" => href = String::from_utf8(attr.value.to_vec())?,
                            b"media-type" => {
                                media_type = String::from_utf8(attr.value.to_vec())?
                            }
                            _ => {}
                        }
                    }

                    if !id.is_empty() && !href.is_empty() {
                        manifest.insert(id, (href, media_type));
                    }
                }
                b"itemref" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"idref" {
                            spine_ids.push(String::from_utf8(attr.value.to_vec())?);
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok((manifest, spine_ids))
}

/// Join a manifest href onto the OPF directory
fn resolve_path(opf_dir: &str, href: &str) -> String {
    let href = href.trim_start_matches("./");
    if opf_dir.is_empty() {
        href.to_string()
    } else {
        format!("{}/{}", opf_dir, href)
    }
}
