use colored::Colorize;
use pagescope_core::config::{
    InputError, OutputChoice, RECOMMENDED_THRESHOLD_KB, parse_output_choice, parse_search_strings,
    parse_sitemap_url, parse_threshold, parse_url_list,
};
use std::io::{self, BufRead, Write};

/// Interactive prompts over any reader/writer pair.
///
/// Each `ask_*` method re-prompts until the answer validates. `Ok(None)`
/// means input ended before a valid answer was given.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", question.bright_cyan().bold())?;
        self.output.flush()?;

        let mut response = String::new();
        if self.input.read_line(&mut response)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(response.trim().to_string()))
    }

    fn ask<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.read_answer(question)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "{} {}", "✗".red().bold(), e)?,
            }
        }
    }

    /// End of input counts as `x`.
    pub fn ask_output_choice(&mut self) -> io::Result<OutputChoice> {
        let choice = self.ask(
            "Do you want the results in the console or as a file? \
             (press 'c' for console, 'f' for file, 'x' to exit):",
            parse_output_choice,
        )?;
        Ok(choice.unwrap_or(OutputChoice::Exit))
    }

    pub fn ask_url_list(&mut self) -> io::Result<Option<Vec<String>>> {
        self.ask(
            "Enter a comma-separated list of URLs \
             (e.g., https://example.com/page1, https://example.com/page2):",
            parse_url_list,
        )
    }

    pub fn ask_sitemap_url(&mut self) -> io::Result<Option<String>> {
        self.ask(
            "Enter the sitemap URL (must be a valid XML sitemap):",
            parse_sitemap_url,
        )
    }

    pub fn ask_threshold(&mut self) -> io::Result<Option<f64>> {
        let question = format!(
            "Enter the size threshold in kilobytes (KB) for reporting large assets \
             (recommendation {}):",
            RECOMMENDED_THRESHOLD_KB
        );
        self.ask(&question, parse_threshold)
    }

    pub fn ask_search_strings(&mut self) -> io::Result<Option<Vec<String>>> {
        self.ask(
            "Enter the search strings (comma-separated):",
            parse_search_strings,
        )
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
