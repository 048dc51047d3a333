//! Line oriented front-end over a [`Session`].
//!
//! ```text
//! gcd> solve 6.20889,106.8275 35.5,100 8
//! gcd> search Jakarta
//! gcd> quit
//! ```

use crate::{
    Format,
    session::{Request, Response, Session},
};
use gcd_core::{Geocoder, Location, Sampling};
use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};
use thiserror::Error;

const PROMPT: &str = "gcd> ";

pub const HELP: &str = "\
commands:
  solve <lat,lon> <lat,lon> [points|step]   distance, azimuths and path
  search <place name>                       look up the coordinates of a place
  help                                      this message
  quit                                      leave";

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("usage: solve <lat,lon> <lat,lon> [points|step]")]
    SolveUsage,
    #[error("usage: search <place name>")]
    SearchUsage,
    #[error("invalid {what} `{input}`: {reason}")]
    Invalid {
        what: &'static str,
        input: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Request(Request),
    Help,
    Quit,
}

fn parse_arg<T>(what: &'static str, input: &str) -> Result<T, CommandError>
where
    T: FromStr<Err = anyhow::Error>,
{
    input.parse().map_err(|error: anyhow::Error| CommandError::Invalid {
        what,
        input: input.to_owned(),
        reason: format!("{error:#}"),
    })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match keyword.to_ascii_lowercase().as_str() {
            "solve" => {
                let args: Vec<&str> = rest.split_whitespace().collect();
                let (start, end, sampling) = match args.as_slice() {
                    [start, end] => (start, end, None),
                    [start, end, sampling] => (start, end, Some(sampling)),
                    _ => return Err(CommandError::SolveUsage),
                };

                let start: Location = parse_arg("start location", start)?;
                let end: Location = parse_arg("end location", end)?;
                let sampling = match sampling {
                    Some(sampling) => parse_arg("sampling", sampling)?,
                    None => Sampling::default(),
                };

                Ok(Self::Request(Request::Solve {
                    start,
                    end,
                    sampling,
                }))
            }
            "search" if rest.is_empty() => Err(CommandError::SearchUsage),
            "search" => Ok(Self::Request(Request::Search {
                query: rest.to_owned(),
            })),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(keyword.to_owned())),
        }
    }
}

fn render(response: &Response, format: Format, precision: usize) -> io::Result<String> {
    match (response, format) {
        (Response::Solved(report), Format::Geojson) => {
            serde_json::to_string_pretty(&report.to_geojson(precision)).map_err(io::Error::from)
        }
        _ => Ok(response.to_text(precision)),
    }
}

/// Read commands from `input` until end of input or `quit`.
///
/// A failing command is reported on `output` and the loop goes on; only
/// I/O errors end it early.
pub fn run<G, R, W>(
    session: &Session<G>,
    input: R,
    mut output: W,
    format: Format,
    precision: usize,
) -> io::Result<()>
where
    G: Geocoder,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(output, "{HELP}")?,
            Ok(Command::Request(request)) => {
                log::debug!("{request:?}");
                let response = session.handle(request);
                writeln!(output, "{}", render(&response, format, precision)?)?;
            }
            Err(error) => writeln!(output, "error: {error}")?,
        }
    }

    Ok(())
}
