//! Convert command - Turn a markup fragment into DOM statements

use clap::{Args, ValueEnum};
use etch_atelier::{convert_bytes, ConvertOptions, ConvertOutput, NamingStrategyKind, QuoteStyle};
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Output the generated JavaScript
    #[default]
    Js,
    /// Output JSON with code and warnings
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamingArg {
    /// Names from the element's id, name or tag (p1, mainNav1)
    StructureDerived,
    /// Names from a fixed adjective/noun pool (amberBrook)
    WordPool,
}

impl From<NamingArg> for NamingStrategyKind {
    fn from(arg: NamingArg) -> Self {
        match arg {
            NamingArg::StructureDerived => Self::StructureDerived,
            NamingArg::WordPool => Self::WordPool,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuoteArg {
    /// 'text'
    Single,
    /// "text"
    Double,
}

impl From<QuoteArg> for QuoteStyle {
    fn from(arg: QuoteArg) -> Self {
        match arg {
            QuoteArg::Single => Self::Single,
            QuoteArg::Double => Self::Double,
        }
    }
}

#[derive(Args, Default)]
pub struct ConvertArgs {
    /// Markup file to convert (default: stdin)
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Variable the top-level nodes are appended to (default: fragment)
    #[arg(long)]
    pub root: Option<String>,

    /// Naming strategy for element variables
    #[arg(long, value_enum)]
    pub naming: Option<NamingArg>,

    /// String literal delimiter
    #[arg(long, value_enum)]
    pub quote: Option<QuoteArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "js")]
    pub format: OutputFormat,

    /// Emit createComment statements for markup comments
    #[arg(long)]
    pub comments: bool,

    /// Fail on markup parse errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, serde::Serialize)]
struct JsonOutput<'a> {
    code: &'a str,
    warnings: Vec<String>,
}

impl ConvertArgs {
    /// Apply command-line flags on top of the configured defaults
    pub fn resolve_options(&self, defaults: &ConvertOptions) -> ConvertOptions {
        let mut options = defaults.clone();
        if let Some(root) = &self.root {
            options.root_name = Some(root.as_str().into());
        }
        if let Some(naming) = self.naming {
            options.naming = naming.into();
        }
        if let Some(quote) = self.quote {
            options.quote = quote.into();
        }
        options.comments |= self.comments;
        options.strict |= self.strict;
        options
    }
}

pub fn run(args: ConvertArgs, defaults: &ConvertOptions) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.resolve_options(defaults);

    let input = match &args.input {
        Some(path) => std::fs::read(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let output = convert_bytes(&input, &options)?;
    let rendered = render(&output, args.format)?;

    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?,
        None => std::io::stdout().lock().write_all(rendered.as_bytes())?,
    }

    Ok(())
}

fn render(output: &ConvertOutput, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Js => Ok(output.code.clone()),
        OutputFormat::Json => {
            let json = JsonOutput {
                code: &output.code,
                warnings: output.warnings.iter().map(ToString::to_string).collect(),
            };
            let mut rendered = serde_json::to_string_pretty(&json)?;
            rendered.push('\n');
            Ok(rendered)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etch_atelier::convert_with_options;

    #[test]
    fn test_flags_override_config() {
        let defaults = ConvertOptions {
            root_name: Some("host".into()),
            naming: NamingStrategyKind::WordPool,
            comments: true,
            ..Default::default()
        };
        let args = ConvertArgs {
            root: Some("app".to_string()),
            quote: Some(QuoteArg::Double),
            ..Default::default()
        };
        let options = args.resolve_options(&defaults);
        assert_eq!(options.resolved_root_name(), "app");
        assert_eq!(options.naming, NamingStrategyKind::WordPool);
        assert_eq!(options.quote, QuoteStyle::Double);
        assert!(options.comments);
        assert!(!options.strict);
    }

    #[test]
    fn test_render_json() {
        let output = convert_with_options("<p>x", &ConvertOptions::default()).unwrap();
        let rendered = render(&output, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            value["code"],
            "var p1 = fragment.appendChild(document.createElement('p'));\np1.textContent = 'x';\n"
        );
        assert_eq!(value["warnings"][0], "Element is missing end tag. (1:1)");
    }

    #[test]
    fn test_render_js() {
        let output = convert_with_options("<i></i>", &ConvertOptions::default()).unwrap();
        assert_eq!(
            render(&output, OutputFormat::Js).unwrap(),
            "var i1 = fragment.appendChild(document.createElement('i'));\n"
        );
    }
}
