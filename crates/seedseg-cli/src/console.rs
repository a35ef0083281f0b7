//! Line-oriented console driving one segmentation session
//!
//! Every input line and every status line is recorded in a transcript,
//! which `SAVE_PROGRAM_OUTPUT` writes to a file.

use crate::commands::{Command, ParseError, USAGE};
use log::{error, info};
use seedseg::{OutputType, Prerequisite, SegmentationSession, SessionError};
use std::io::{self, BufRead, Write};
use std::path::Path;

const INVALID_COMMAND: &str = "Please enter valid command";
const NEED_IMAGE: &str = "Please load input image first";
const NEED_REGION: &str = "Please calculate region first";
const NEED_PERIMETER: &str = "Please calculate perimeter first";
const SEED_OUT_OF_RANGE: &str = "Please enter seed point within image bounds";
const INVALID_IMAGE: &str = "Invalid Image path/file.";
const SOMETHING_WRONG: &str = "Something went wrong. Please see the error message above.";
const NO_DISPLAY: &str = "Display is not available in this build";

/// Whether the read loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Console<W: Write> {
    session: SegmentationSession,
    out: W,
    transcript: Vec<String>,
}

impl<W: Write> Console<W> {
    pub fn new(session: SegmentationSession, out: W) -> Self {
        Self {
            session,
            out,
            transcript: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &SegmentationSession {
        &self.session
    }

    /// Recorded input and status lines, in order.
    #[cfg(test)]
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands until `EXIT` or end of input.
    ///
    /// With `prompt` set, a `>>` prompt is written before each line.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> io::Result<()> {
        self.status(USAGE)?;
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(self.out, ">>")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            if self.handle_line(&line?)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Record and execute one input line.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        self.transcript.push(line.to_string());

        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                info!("rejected input {:?}: {}", line, e);
                self.status(INVALID_COMMAND)?;
                // Unrecognized names get the command list again
                if matches!(e, ParseError::Unknown(_)) {
                    self.status(USAGE)?;
                }
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::InputImagePath(path) => {
                let result = self.session.load_path(&path);
                self.report(result, "Image loaded successfully.")?;
            }
            Command::FindRegion { x, y, tolerance } => {
                let result = match tolerance {
                    Some(t) => self.session.compute_region(x, y, t),
                    None => self.session.compute_region_default(x, y),
                };
                self.report(result, "Region found completed.")?;
            }
            Command::FindPerimeter => {
                let result = self.session.compute_perimeter();
                self.report(result, "Perimeter find completed")?;
            }
            Command::FindSmoothPerimeter => {
                let result = self.session.smooth_perimeter();
                self.report(result, "Perimeter smoothening completed")?;
            }
            Command::DisplayImage => {
                let text = if self.session.is_loaded() {
                    NO_DISPLAY
                } else {
                    NEED_IMAGE
                };
                self.status(text)?;
            }
            Command::DisplayPixels(output) => {
                let text = self.missing_for(output).unwrap_or(NO_DISPLAY);
                self.status(text)?;
            }
            Command::SavePixels(output, path) => {
                let result = self.session.save_mask(output, &path);
                self.report(result, "Output save completed")?;
            }
            Command::SaveProgramOutput(path) => self.save_transcript(&path)?,
            Command::Help => self.status(USAGE)?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Status line for the first stage `output` still needs, if any.
    fn missing_for(&self, output: OutputType) -> Option<&'static str> {
        if !self.session.is_loaded() {
            Some(NEED_IMAGE)
        } else if !self.session.is_region_ready() {
            Some(NEED_REGION)
        } else if output == OutputType::Perimeter && !self.session.is_perimeter_ready() {
            Some(NEED_PERIMETER)
        } else {
            None
        }
    }

    fn report(&mut self, result: Result<(), SessionError>, success: &str) -> io::Result<()> {
        let text = match &result {
            Ok(()) => success,
            Err(SessionError::NotReady { missing, .. }) => match missing {
                Prerequisite::Image => NEED_IMAGE,
                Prerequisite::Region => NEED_REGION,
                Prerequisite::Perimeter => NEED_PERIMETER,
            },
            Err(SessionError::SeedOutOfRange { .. }) => SEED_OUT_OF_RANGE,
            Err(SessionError::InvalidImage(_)) => INVALID_IMAGE,
            Err(e) => {
                error!("{}", e);
                SOMETHING_WRONG
            }
        };
        self.status(text)
    }

    fn save_transcript(&mut self, path: &Path) -> io::Result<()> {
        let mut contents = self.transcript.join("\n");
        contents.push('\n');
        match std::fs::write(path, contents) {
            Ok(()) => {
                info!("transcript written to {}", path.display());
                self.status("Program output saved")
            }
            Err(e) => {
                error!("cannot write transcript to {}: {}", path.display(), e);
                self.status(SOMETHING_WRONG)
            }
        }
    }

    fn status(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", text)?;
        self.transcript.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedseg::io::write_image;
    use seedseg::{ColorSample, ImageFormat};
    use seedseg_test::{scratch_path, solid_rgb};

    fn console() -> Console<Vec<u8>> {
        Console::new(SegmentationSession::new(), Vec::new())
    }

    fn last_status(console: &Console<Vec<u8>>) -> &str {
        console.transcript().last().map(String::as_str).unwrap_or("")
    }

    fn white_image(name: &str) -> std::path::PathBuf {
        let path = scratch_path(name);
        let pix = solid_rgb(10, 10, ColorSample::new(255, 255, 255)).unwrap();
        write_image(&pix, &path, ImageFormat::Png).unwrap();
        path
    }

    #[test]
    fn test_stage_messages() {
        let mut c = console();
        c.handle_line("FIND_PERIMETER").unwrap();
        assert_eq!(last_status(&c), NEED_IMAGE);

        let image = white_image("console_stage.png");
        c.handle_line(&format!("INPUT_IMAGE_PATH {}", image.display()))
            .unwrap();
        assert_eq!(last_status(&c), "Image loaded successfully.");

        c.handle_line("FIND_PERIMETER").unwrap();
        assert_eq!(last_status(&c), NEED_REGION);

        c.handle_line("FIND_REGION 100 100 5").unwrap();
        assert_eq!(last_status(&c), SEED_OUT_OF_RANGE);

        c.handle_line("FIND_REGION 5 5 10").unwrap();
        assert_eq!(last_status(&c), "Region found completed.");

        c.handle_line("FIND_SMOOTH_PERIMETER").unwrap();
        assert_eq!(last_status(&c), NEED_PERIMETER);

        c.handle_line("FIND_PERIMETER").unwrap();
        assert_eq!(last_status(&c), "Perimeter find completed");
        c.handle_line("FIND_SMOOTH_PERIMETER").unwrap();
        assert_eq!(last_status(&c), "Perimeter smoothening completed");
        assert!(c.session().is_perimeter_smoothed());

        let _ = std::fs::remove_file(&image);
    }

    #[test]
    fn test_invalid_input() {
        let mut c = console();
        c.handle_line("").unwrap();
        assert_eq!(last_status(&c), INVALID_COMMAND);
        c.handle_line("FIND_REGION 1").unwrap();
        assert_eq!(last_status(&c), INVALID_COMMAND);
        c.handle_line("INPUT_IMAGE_PATH /no/such/file.png").unwrap();
        assert_eq!(last_status(&c), INVALID_IMAGE);
    }

    #[test]
    fn test_unknown_command_repeats_usage() {
        let mut c = console();
        c.handle_line("FLOOD 1 2").unwrap();
        let transcript = c.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1], INVALID_COMMAND);
        assert_eq!(transcript[2], USAGE);

        let printed = String::from_utf8(c.into_output()).unwrap();
        assert!(printed.contains(INVALID_COMMAND));
        assert!(printed.ends_with(&format!("{USAGE}\n")));
    }

    #[test]
    fn test_display_is_unavailable() {
        let mut c = console();
        c.handle_line("DISPLAY_IMAGE").unwrap();
        assert_eq!(last_status(&c), NEED_IMAGE);

        let image = white_image("console_display.png");
        c.handle_line(&format!("INPUT_IMAGE_PATH {}", image.display()))
            .unwrap();
        c.handle_line("DISPLAY_IMAGE").unwrap();
        assert_eq!(last_status(&c), NO_DISPLAY);
        c.handle_line("DISPLAY_PIXELS perimeter").unwrap();
        assert_eq!(last_status(&c), NEED_REGION);

        let _ = std::fs::remove_file(&image);
    }

    #[test]
    fn test_save_pixels_and_transcript() {
        let mut c = console();
        let image = white_image("console_save_in.png");
        let mask_path = scratch_path("console_region.pgm");
        let log_path = scratch_path("console_transcript.txt");

        let script = format!(
            "INPUT_IMAGE_PATH {}\nFIND_REGION 5 5\nSAVE_PIXELS region {}\nSAVE_PROGRAM_OUTPUT {}\nEXIT\nHELP\n",
            image.display(),
            mask_path.display(),
            log_path.display()
        );
        c.run(script.as_bytes(), false).unwrap();

        // Stopped at EXIT
        assert_eq!(c.transcript().last().map(String::as_str), Some("EXIT"));

        let saved = seedseg::io::read_image(&mask_path).unwrap();
        assert_eq!(saved.count_foreground(), 36);

        let log = std::fs::read_to_string(&log_path).unwrap();
        assert!(log.contains("FIND_REGION 5 5\nRegion found completed.\n"));
        assert!(log.contains("Output save completed"));
        assert!(!log.contains("Program output saved"));

        let printed = String::from_utf8(c.into_output()).unwrap();
        assert!(printed.contains("\nProgram output saved\n"));

        for path in [&image, &mask_path, &log_path] {
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn test_prompt_written_when_interactive() {
        let mut c = console();
        c.run("EXIT\n".as_bytes(), true).unwrap();
        let printed = String::from_utf8(c.into_output()).unwrap();
        assert!(printed.ends_with(">>"));
    }
}
