//! Console command parsing

use seedseg::OutputType;
use std::path::PathBuf;
use thiserror::Error;

/// One console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `INPUT_IMAGE_PATH <file>`
    InputImagePath(PathBuf),
    /// `FIND_REGION <x> <y> [tolerance]`
    FindRegion {
        x: i64,
        y: i64,
        tolerance: Option<u32>,
    },
    /// `FIND_PERIMETER`
    FindPerimeter,
    /// `FIND_SMOOTH_PERIMETER`
    FindSmoothPerimeter,
    /// `DISPLAY_IMAGE`
    DisplayImage,
    /// `DISPLAY_PIXELS region|perimeter`
    DisplayPixels(OutputType),
    /// `SAVE_PIXELS region|perimeter <file>`
    SavePixels(OutputType, PathBuf),
    /// `SAVE_PROGRAM_OUTPUT <file>`
    SaveProgramOutput(PathBuf),
    /// `HELP`
    Help,
    /// `EXIT`
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}")]
    Unknown(String),

    #[error("{command}: {reason}")]
    BadArguments {
        command: &'static str,
        reason: String,
    },
}

/// Usage text printed by `HELP`.
pub const USAGE: &str = "\
To load the image
> INPUT_IMAGE_PATH <filename>
To find region
> FIND_REGION <seed_x> <seed_y> [tolerance]
To find perimeter
> FIND_PERIMETER
To make perimeter smooth
> FIND_SMOOTH_PERIMETER
To show input image
> DISPLAY_IMAGE
To show output image
> DISPLAY_PIXELS region|perimeter
To save output
> SAVE_PIXELS region|perimeter <filename>
To save program output
> SAVE_PROGRAM_OUTPUT <filename>
To exit application
> EXIT
To get list of available commands
> HELP";

impl Command {
    /// Parse one input line.
    ///
    /// Command names are case-sensitive; arguments are separated by
    /// whitespace.
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Err(ParseError::Empty);
        };
        let args: Vec<&str> = tokens.collect();

        match name {
            "INPUT_IMAGE_PATH" => {
                let [path] = expect_args::<1>("INPUT_IMAGE_PATH", &args)?;
                Ok(Command::InputImagePath(PathBuf::from(path)))
            }
            "FIND_REGION" => {
                let (x, y, tolerance) = match args.as_slice() {
                    [x, y] => (*x, *y, None),
                    [x, y, t] => (*x, *y, Some(*t)),
                    _ => return Err(bad("FIND_REGION", "expected <x> <y> [tolerance]")),
                };
                Ok(Command::FindRegion {
                    x: parse_number("FIND_REGION", "seed x", x)?,
                    y: parse_number("FIND_REGION", "seed y", y)?,
                    tolerance: tolerance
                        .map(|t| parse_number("FIND_REGION", "tolerance", t))
                        .transpose()?,
                })
            }
            "FIND_PERIMETER" => {
                expect_args::<0>("FIND_PERIMETER", &args)?;
                Ok(Command::FindPerimeter)
            }
            "FIND_SMOOTH_PERIMETER" => {
                expect_args::<0>("FIND_SMOOTH_PERIMETER", &args)?;
                Ok(Command::FindSmoothPerimeter)
            }
            "DISPLAY_IMAGE" => {
                expect_args::<0>("DISPLAY_IMAGE", &args)?;
                Ok(Command::DisplayImage)
            }
            "DISPLAY_PIXELS" => {
                let [output] = expect_args::<1>("DISPLAY_PIXELS", &args)?;
                Ok(Command::DisplayPixels(parse_output("DISPLAY_PIXELS", output)?))
            }
            "SAVE_PIXELS" => {
                let [output, path] = expect_args::<2>("SAVE_PIXELS", &args)?;
                Ok(Command::SavePixels(
                    parse_output("SAVE_PIXELS", output)?,
                    PathBuf::from(path),
                ))
            }
            "SAVE_PROGRAM_OUTPUT" => {
                let [path] = expect_args::<1>("SAVE_PROGRAM_OUTPUT", &args)?;
                Ok(Command::SaveProgramOutput(PathBuf::from(path)))
            }
            "HELP" => Ok(Command::Help),
            "EXIT" => Ok(Command::Exit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn bad(command: &'static str, reason: impl Into<String>) -> ParseError {
    ParseError::BadArguments {
        command,
        reason: reason.into(),
    }
}

fn expect_args<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], ParseError> {
    <[&str; N]>::try_from(args)
        .map_err(|_| bad(command, format!("expected {N} argument(s), got {}", args.len())))
}

fn parse_number<T: std::str::FromStr>(
    command: &'static str,
    what: &str,
    token: &str,
) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|_| bad(command, format!("invalid {what}: {token:?}")))
}

fn parse_output(command: &'static str, token: &str) -> Result<OutputType, ParseError> {
    token.parse().map_err(|e: String| bad(command, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("FIND_PERIMETER"), Ok(Command::FindPerimeter));
        assert_eq!(
            Command::parse("  FIND_SMOOTH_PERIMETER  "),
            Ok(Command::FindSmoothPerimeter)
        );
        assert_eq!(Command::parse("HELP"), Ok(Command::Help));
        assert_eq!(Command::parse("EXIT"), Ok(Command::Exit));
        assert_eq!(Command::parse("DISPLAY_IMAGE"), Ok(Command::DisplayImage));
    }

    #[test]
    fn test_parse_find_region() {
        assert_eq!(
            Command::parse("FIND_REGION 5 6 10"),
            Ok(Command::FindRegion {
                x: 5,
                y: 6,
                tolerance: Some(10)
            })
        );
        assert_eq!(
            Command::parse("FIND_REGION -1 6"),
            Ok(Command::FindRegion {
                x: -1,
                y: 6,
                tolerance: None
            })
        );
        assert!(Command::parse("FIND_REGION 5").is_err());
        assert!(Command::parse("FIND_REGION a 6 10").is_err());
        assert!(Command::parse("FIND_REGION 5 6 -2").is_err());
        assert!(Command::parse("FIND_REGION 1 2 3 4").is_err());
    }

    #[test]
    fn test_parse_paths_and_outputs() {
        assert_eq!(
            Command::parse("INPUT_IMAGE_PATH pic.png"),
            Ok(Command::InputImagePath(PathBuf::from("pic.png")))
        );
        assert_eq!(
            Command::parse("SAVE_PIXELS perimeter out.pgm"),
            Ok(Command::SavePixels(
                OutputType::Perimeter,
                PathBuf::from("out.pgm")
            ))
        );
        assert_eq!(
            Command::parse("DISPLAY_PIXELS region"),
            Ok(Command::DisplayPixels(OutputType::Region))
        );
        assert_eq!(
            Command::parse("SAVE_PROGRAM_OUTPUT log.txt"),
            Ok(Command::SaveProgramOutput(PathBuf::from("log.txt")))
        );
        assert!(Command::parse("SAVE_PIXELS outline out.png").is_err());
        assert!(Command::parse("SAVE_PIXELS region").is_err());
        assert!(Command::parse("INPUT_IMAGE_PATH").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Command::parse(""), Err(ParseError::Empty));
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(
            Command::parse("find_region 1 2 3"),
            Err(ParseError::Unknown("find_region".into()))
        );
        assert!(matches!(
            Command::parse("FIND_PERIMETER now"),
            Err(ParseError::BadArguments {
                command: "FIND_PERIMETER",
                ..
            })
        ));
    }
}
