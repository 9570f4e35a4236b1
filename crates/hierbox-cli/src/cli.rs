//! Command-line interface for the hierbox utility
//!
//! Renders JSON label hierarchies as SVG documents, character-grid
//! previews or JSON draw-call dumps.

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::colorizer::colorize_output;
use hierbox::core::logging::init_logging;
use hierbox::core::{CharacterSet, ConfigOverrides, LayoutConfig, MonospaceMetrics, Palette};
use hierbox::hierarchy::{plan_canvas, Hierarchy, HierarchyRenderer};

/// Hierbox - render label hierarchies as box diagrams
#[derive(Parser)]
#[command(name = "hierbox")]
#[command(about = "A Rust utility to render nested label hierarchies as diagrams of connected boxes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a hierarchy
    Render {
        /// Input JSON file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,

        /// Character set for the ascii preview
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// When to use colors in the ascii preview
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show depth, leaf count and canvas size
    Stats {
        /// Input JSON file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// List the built-in colour palettes
    Palettes {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check that a hierarchy and config can be laid out
    Validate {
        /// Input JSON file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

/// Layout settings shared by the subcommands
///
/// Flags win over the config file, which wins over the defaults.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct LayoutArgs {
    /// JSON file with layout overrides (camelCase keys)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stagger deep or bushy sub-trees into offset lanes
    #[arg(long)]
    pub compact: bool,

    /// Compact depth threshold
    #[arg(long)]
    pub ct: Option<usize>,

    /// Minimum box content width in pixels
    #[arg(long)]
    pub min_width: Option<f64>,

    /// Maximum box content width in pixels
    #[arg(long)]
    pub max_width: Option<f64>,

    /// Label font size in pixels
    #[arg(long)]
    pub font_size: Option<f64>,

    /// Built-in colour palette
    #[arg(long, value_enum)]
    pub palette: Option<PaletteChoice>,
}

impl LayoutArgs {
    /// Overrides expressed by the flags alone
    pub fn flag_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            compact: self.compact.then_some(true),
            ct: self.ct,
            min_width: self.min_width,
            max_width: self.max_width,
            font_size: self.font_size,
            ..ConfigOverrides::default()
        }
    }

    /// Resolve defaults, palette, config file and flags into one config
    pub fn resolve(&self) -> Result<LayoutConfig> {
        let mut builder = LayoutConfig::builder();
        if let Some(palette) = self.palette {
            builder = builder.color_scheme(Palette::from(palette).scheme());
        }
        if let Some(path) = &self.config {
            let text = fs::read_to_string(path).map_err(|e| {
                anyhow!("Failed to read config file '{}': {}", path.display(), e)
            })?;
            let overrides = ConfigOverrides::from_json(&text)
                .map_err(|e| anyhow!("Invalid config file '{}': {}", path.display(), e))?;
            builder = builder.overrides(overrides);
        }
        Ok(builder.overrides(self.flag_overrides()).build()?)
    }
}

/// Output formats of the render command
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Standalone SVG document
    Svg,
    /// Character-grid preview
    Ascii,
    /// Recorded draw calls
    Json,
}

/// Character sets of the ascii preview
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for CharacterSet {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => CharacterSet::Ascii,
            StyleChoice::Unicode => CharacterSet::Unicode,
        }
    }
}

/// Built-in palettes
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum PaletteChoice {
    Blue,
    Maroon,
    Pink,
    Green,
    Orange,
    Purple,
    Grey,
}

impl From<PaletteChoice> for Palette {
    fn from(value: PaletteChoice) -> Self {
        match value {
            PaletteChoice::Blue => Palette::Blue,
            PaletteChoice::Maroon => Palette::Maroon,
            PaletteChoice::Pink => Palette::Pink,
            PaletteChoice::Green => Palette::Green,
            PaletteChoice::Orange => Palette::Orange,
            PaletteChoice::Purple => Palette::Purple,
            PaletteChoice::Grey => Palette::Grey,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Main CLI application
#[derive(Default)]
pub struct HierboxApp;

impl HierboxApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over the flags
        let log_level_str = std::env::var("HIERBOX_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));
        let log_format_str = std::env::var("HIERBOX_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Hierbox v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                input,
                output,
                format,
                style,
                color,
                layout,
            } => {
                let content = self.read_input(input)?;
                let config = layout.resolve()?;
                let should_colorize =
                    format == OutputFormat::Ascii && self.should_colorize(&output, color);
                let mut rendered = self.render(&content, config.clone(), format, style.into())?;
                if should_colorize {
                    rendered = colorize_output(&rendered, &config.color_scheme);
                }
                if cli.verbose {
                    eprintln!("Rendered {} bytes of {:?} output", rendered.len(), format);
                }
                self.write_output(output, &rendered)
            }
            Commands::Stats {
                input,
                json,
                layout,
            } => {
                let content = self.read_input(input)?;
                let stats = self.stats(&content, &layout.resolve()?, json)?;
                println!("{}", stats);
                Ok(())
            }
            Commands::Palettes { json } => {
                println!("{}", self.palettes(json)?);
                Ok(())
            }
            Commands::Validate { input, layout } => {
                let content = self.read_input(input)?;
                match self.validate(&content, &layout) {
                    Ok(message) => {
                        println!("✓ {}", message);
                        Ok(())
                    }
                    Err(e) => {
                        println!("✗ Invalid hierarchy: {}", e);
                        Err(e)
                    }
                }
            }
        }
    }

    /// Lay out `content` in the requested format
    pub fn render(
        &self,
        content: &str,
        config: LayoutConfig,
        format: OutputFormat,
        style: CharacterSet,
    ) -> Result<String> {
        let tree = Hierarchy::from_json(content)?;
        let renderer = HierarchyRenderer::new(config);
        debug!(?format, nodes = tree.node_count(), "Rendering hierarchy");

        let rendered = match format {
            OutputFormat::Svg => renderer.render_svg(&tree)?,
            OutputFormat::Ascii => renderer.render_ascii(&tree, style)?,
            OutputFormat::Json => renderer.draw_list(&tree)?.to_json()?,
        };
        Ok(rendered)
    }

    /// Depth, leaf count and canvas size of `content`
    pub fn stats(&self, content: &str, config: &LayoutConfig, json: bool) -> Result<String> {
        let tree = Hierarchy::from_json(content)?;
        let plan = plan_canvas(&tree, config, &MonospaceMetrics::new())?;
        let mode = if config.compact {
            format!("compact (ct={})", config.ct)
        } else {
            "side by side".to_string()
        };

        if json {
            let stats = serde_json::json!({
                "nodes": tree.node_count(),
                "depth": tree.depth(),
                "leaves": tree.terminal_count(),
                "columns": plan.leaf_count,
                "compact": config.compact,
                "ct": config.ct,
                "canvas": plan.canvas,
            });
            return Ok(serde_json::to_string_pretty(&stats)?);
        }

        Ok(format!(
            "Nodes:   {}\nDepth:   {}\nLeaves:  {}\nColumns: {}\nMode:    {}\nCanvas:  {}",
            tree.node_count(),
            tree.depth(),
            tree.terminal_count(),
            plan.leaf_count,
            mode,
            plan.canvas
        ))
    }

    /// The built-in palettes, one per line or as JSON
    pub fn palettes(&self, json: bool) -> Result<String> {
        if json {
            let palettes: Vec<_> = Palette::all()
                .iter()
                .map(|palette| {
                    serde_json::json!({
                        "name": palette.to_string(),
                        "scheme": palette.scheme(),
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&palettes)?);
        }

        let mut lines = vec!["Built-in palettes:".to_string()];
        for palette in Palette::all() {
            let scheme = palette.scheme();
            lines.push(format!(
                "  {:<7} stroke {}  fill {}  line {}",
                palette.to_string(),
                scheme.stroke_color,
                scheme.background_color,
                scheme.line_color
            ));
        }
        Ok(lines.join("\n"))
    }

    /// Parse, resolve the config and size the hierarchy without drawing
    pub fn validate(&self, content: &str, layout: &LayoutArgs) -> Result<String> {
        let tree = Hierarchy::from_json(content)?;
        let config = layout.resolve()?;
        let plan = plan_canvas(&tree, &config, &MonospaceMetrics::new())?;
        info!(canvas = %plan.canvas, "Validated hierarchy");

        let mut message = format!(
            "Valid hierarchy: {} nodes, depth {}",
            tree.node_count(),
            tree.depth()
        );
        if tree.len() > 1 {
            message.push_str(&format!(" ({} top-level entries, expected 1)", tree.len()));
        }
        Ok(message)
    }

    /// Determine if we should colorize the output based on color choice and output destination
    fn should_colorize(&self, output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                match output {
                    None => crossterm::tty::IsTty::is_tty(&std::io::stdout()),
                    Some(p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&std::io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                if content.is_empty() || content.ends_with('\n') {
                    write!(stdout, "{}", content)?;
                } else {
                    writeln!(stdout, "{}", content)?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{"root": {"a": {}, "b": {"c": {}, "d": {}}}}"#;

    #[test]
    fn test_cli_parsing_render_command() {
        let args = vec![
            "hierbox", "render", "--input", "tree.json", "--output", "tree.svg", "--format",
            "ascii", "--compact", "--ct", "1", "--palette", "grey",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render {
                input,
                output,
                format,
                style,
                color,
                layout,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "tree.json");
                assert_eq!(output.unwrap().to_string_lossy(), "tree.svg");
                assert_eq!(format, OutputFormat::Ascii);
                assert_eq!(style, StyleChoice::Unicode);
                assert_eq!(color, ColorChoice::Auto);
                assert!(layout.compact);
                assert_eq!(layout.ct, Some(1));
                assert_eq!(layout.palette, Some(PaletteChoice::Grey));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parsing_defaults() {
        let cli = Cli::try_parse_from(["hierbox", "render"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.log_format, LogFormat::Compact);
        match cli.command {
            Commands::Render { format, layout, .. } => {
                assert_eq!(format, OutputFormat::Svg);
                assert_eq!(layout, LayoutArgs::default());
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parsing_stats_and_palettes() {
        let cli = Cli::try_parse_from(["hierbox", "stats", "--json", "--compact"]).unwrap();
        match cli.command {
            Commands::Stats { json, layout, .. } => {
                assert!(json);
                assert!(layout.compact);
            }
            _ => panic!("Expected Stats command"),
        }

        let cli = Cli::try_parse_from(["hierbox", "palettes"]).unwrap();
        assert!(matches!(cli.command, Commands::Palettes { json: false }));
    }

    #[test]
    fn test_cli_rejects_unknown_palette() {
        assert!(Cli::try_parse_from(["hierbox", "render", "--palette", "teal"]).is_err());
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(["hierbox", "--verbose", "validate"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, r#"{"isCompact": true, "ct": 2, "minWid": 40, "maxWid": 90}"#).unwrap();

        let layout = LayoutArgs {
            config: Some(path),
            ct: Some(1),
            palette: Some(PaletteChoice::Pink),
            ..LayoutArgs::default()
        };
        let config = layout.resolve().unwrap();
        assert!(config.compact);
        assert_eq!(config.ct, 1);
        assert_eq!(config.min_width, 40.0);
        assert_eq!(config.max_width, 90.0);
        assert_eq!(config.color_scheme, Palette::Pink.scheme());
    }

    #[test]
    fn test_bad_config_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        fs::write(&path, r#"{"zoom": 3}"#).unwrap();
        let layout = LayoutArgs {
            config: Some(path),
            ..LayoutArgs::default()
        };
        let err = layout.resolve().unwrap_err().to_string();
        assert!(err.contains("Invalid config file"));
    }

    #[test]
    fn test_invalid_flag_values_are_rejected() {
        let layout = LayoutArgs {
            min_width: Some(120.0),
            max_width: Some(60.0),
            ..LayoutArgs::default()
        };
        assert!(layout.resolve().is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let app = HierboxApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tree.json");
        fs::write(&file_path, SAMPLE).unwrap();

        let content = app.read_input(Some(file_path)).unwrap();
        assert_eq!(content, SAMPLE);
    }

    #[test]
    fn test_read_input_missing_file() {
        let app = HierboxApp::new();
        let err = app
            .read_input(Some(PathBuf::from("/nonexistent/tree.json")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_write_output_to_file() {
        let app = HierboxApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tree.svg");

        app.write_output(Some(file_path.clone()), "<svg/>").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "<svg/>");
    }

    #[test]
    fn test_render_formats() {
        let app = HierboxApp::new();
        let config = LayoutConfig::default();

        let svg = app
            .render(SAMPLE, config.clone(), OutputFormat::Svg, CharacterSet::Unicode)
            .unwrap();
        assert!(svg.starts_with("<svg"));

        let ascii = app
            .render(SAMPLE, config.clone(), OutputFormat::Ascii, CharacterSet::Ascii)
            .unwrap();
        assert!(ascii.contains("root"));
        assert!(!ascii.contains('\x1b'));

        let json = app
            .render(SAMPLE, config, OutputFormat::Json, CharacterSet::Unicode)
            .unwrap();
        assert!(json.contains("\"op\": \"connector\""));
    }

    #[test]
    fn test_stats_output() {
        let app = HierboxApp::new();
        let text = app.stats(SAMPLE, &LayoutConfig::default(), false).unwrap();
        assert!(text.contains("Nodes:   5"));
        assert!(text.contains("Depth:   3"));
        assert!(text.contains("Leaves:  3"));
        assert!(text.contains("side by side"));

        let json = app.stats(SAMPLE, &LayoutConfig::default(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"], 5);
        assert_eq!(value["columns"], 3);
        assert!(value["canvas"]["width"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_palettes_listing() {
        let app = HierboxApp::new();
        let text = app.palettes(false).unwrap();
        assert_eq!(text.lines().count(), 1 + Palette::all().len());
        assert!(text.contains("maroon"));

        let json = app.palettes(true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "blue");
        assert_eq!(value[0]["scheme"]["strokeColor"], "#00B395");
    }

    #[test]
    fn test_validate() {
        let app = HierboxApp::new();
        let message = app.validate(SAMPLE, &LayoutArgs::default()).unwrap();
        assert!(message.contains("5 nodes"));

        let forest = app
            .validate(r#"{"a": {}, "b": {}}"#, &LayoutArgs::default())
            .unwrap();
        assert!(forest.contains("2 top-level entries"));

        assert!(app.validate("[]", &LayoutArgs::default()).is_err());
    }
}
