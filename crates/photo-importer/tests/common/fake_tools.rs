//! Scripted process runner emulating the external tools.

#![allow(dead_code)]

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use photo_importer::error::ToolError;
use photo_importer::tools::{ProcessOutput, ProcessRunner};

pub const EXIFTOOL: &str = "/opt/fake/exiftool";
pub const CONVERTER: &str = "/opt/fake/dng-converter";

/// One recorded tool invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn is_probe(&self) -> bool {
        self.args.first().map(String::as_str) == Some("-DateTimeOriginal")
    }

    pub fn is_thumbnail(&self) -> bool {
        self.args.first().map(String::as_str) == Some("-thumbnailimage")
    }

    pub fn is_conversion(&self) -> bool {
        self.program == Path::new(CONVERTER)
    }
}

/// Emulates the metadata tool and the converter.
///
/// Capture dates are scripted per file name; a file without a scripted date
/// gets empty output, as the real tool prints for a missing tag.
#[derive(Default)]
pub struct FakeTools {
    capture_dates: Mutex<HashMap<String, String>>,
    no_thumbnail: Mutex<Vec<String>>,
    consumed_on_convert: Mutex<Vec<String>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl FakeTools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `DateTimeOriginal` for `file_name`, e.g. `2023:07:14 09:30:00`.
    pub fn set_capture_date(&self, file_name: &str, value: &str) {
        self.capture_dates
            .lock()
            .unwrap()
            .insert(file_name.to_string(), value.to_string());
    }

    /// Makes thumbnail extraction fail for `file_name`.
    pub fn fail_thumbnail(&self, file_name: &str) {
        self.no_thumbnail.lock().unwrap().push(file_name.to_string());
    }

    /// Makes the converter remove `file_name` after writing its output, so
    /// the later delete step finds nothing to remove.
    pub fn consume_on_convert(&self, file_name: &str) {
        self.consumed_on_convert
            .lock()
            .unwrap()
            .push(file_name.to_string());
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn count(&self, filter: impl Fn(&Invocation) -> bool) -> usize {
        self.invocations().iter().filter(|i| filter(i)).count()
    }

    fn ok(stdout: &[u8]) -> ProcessOutput {
        ProcessOutput {
            code: Some(0),
            success: true,
            stdout: stdout.to_vec(),
            stderr: Vec::new(),
        }
    }

    fn failed(stderr: &str) -> ProcessOutput {
        ProcessOutput {
            code: Some(1),
            success: false,
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    fn probe(&self, file: &Path) -> ProcessOutput {
        let name = file_name(file);
        match self.capture_dates.lock().unwrap().get(&name) {
            Some(value) => Self::ok(format!("{}\n", value).as_bytes()),
            None => Self::ok(b""),
        }
    }

    fn thumbnail(&self, template: &str, file: &Path) -> ProcessOutput {
        if self.no_thumbnail.lock().unwrap().contains(&file_name(file)) {
            return Self::failed("Warning: No thumbnail image found");
        }
        let stem = file.file_stem().unwrap().to_string_lossy().into_owned();
        std::fs::write(template.replace("%f", &stem), b"\xFF\xD8\xFF\xE0thumb").unwrap();
        Self::ok(b"")
    }

    fn convert(&self, args: &[String]) -> ProcessOutput {
        let dest_dir = PathBuf::from(&args[2]);
        let source = PathBuf::from(args.last().unwrap());
        let stem = source.file_stem().unwrap().to_string_lossy().into_owned();
        std::fs::write(dest_dir.join(format!("{}.dng", stem)), b"II*\0dng").unwrap();
        if self
            .consumed_on_convert
            .lock()
            .unwrap()
            .contains(&file_name(&source))
        {
            std::fs::remove_file(&source).unwrap();
        }
        Self::ok(b"")
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

impl ProcessRunner for FakeTools {
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        _cwd: Option<&Path>,
    ) -> Result<ProcessOutput, ToolError> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        self.invocations.lock().unwrap().push(Invocation {
            program: program.to_path_buf(),
            args: args.clone(),
        });

        if program == Path::new(CONVERTER) {
            return Ok(self.convert(&args));
        }
        if program != Path::new(EXIFTOOL) {
            return Err(ToolError::NotFound(program.display().to_string()));
        }

        let file = PathBuf::from(args.last().unwrap());
        match args.first().map(String::as_str) {
            Some("-DateTimeOriginal") => Ok(self.probe(&file)),
            Some("-thumbnailimage") => Ok(self.thumbnail(&args[3], &file)),
            _ => Ok(Self::failed("unexpected arguments")),
        }
    }
}
