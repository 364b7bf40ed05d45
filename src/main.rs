//! Command-line interface for xsdform

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use xsdform::{
    build_field_model, load_schema, validate, DocumentGenerator, DocumentRenderer, FieldGroups,
    SubmittedValues,
};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsdform")]
#[command(author, version, about = "Schema-driven field modeling and document tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the field model derived from a schema
    Fields {
        /// Path to the schema file
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Render an instance document annotated by its schema
    Render {
        /// Path to the schema file
        #[arg(short, long, value_name = "SCHEMA")]
        schema: PathBuf,

        /// Path to the instance document
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate a schema-shaped document from submitted values
    Generate {
        /// Path to the schema file
        #[arg(short, long, value_name = "SCHEMA")]
        schema: PathBuf,

        /// Path to a JSON file of values: {"Group": {"field": {"value": "..", "annotation": ".."}}}
        #[arg(value_name = "VALUES")]
        values: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fields { schema, json } => cmd_fields(schema, json),
        Commands::Render { schema, file } => cmd_render(schema, file),
        Commands::Generate {
            schema,
            values,
            output,
        } => cmd_generate(schema, values, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn load_groups(schema_path: &PathBuf) -> xsdform::Result<FieldGroups> {
    let schema = load_schema(&fs::read(schema_path)?)?;
    Ok(build_field_model(&schema))
}

#[cfg(feature = "cli")]
fn cmd_fields(schema_path: PathBuf, json: bool) -> xsdform::Result<()> {
    let groups = load_groups(&schema_path)?;

    if json {
        let rendered = serde_json::to_string_pretty(&groups).map_err(|e| {
            xsdform::Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;
        println!("{}", rendered);
        return Ok(());
    }

    for group in groups.iter() {
        println!("{}", group.name);
        for field in &group.fields {
            let mut line = format!("  {} ({:?})", field.name, field.kind);
            if let Some(max) = field.max_length {
                match field.min_length {
                    Some(min) if min == max => line.push_str(&format!(" length {}", max)),
                    _ => line.push_str(&format!(" max length {}", max)),
                }
            }
            if !field.options.is_empty() {
                let values: Vec<&str> = field.options.keys().map(String::as_str).collect();
                line.push_str(&format!(" [{}]", values.join(", ")));
            }
            if let Some(doc) = &field.documentation {
                line.push_str(&format!(" - {}", doc));
            }
            println!("{}", line);
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_render(schema_path: PathBuf, file: PathBuf) -> xsdform::Result<()> {
    let schema = load_schema(&fs::read(&schema_path)?)?;
    let instance = fs::read(&file)?;

    let rendered = DocumentRenderer::new().render(&instance, &schema)?;
    print!("{}", rendered);
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_generate(
    schema_path: PathBuf,
    values_path: PathBuf,
    output: Option<PathBuf>,
) -> xsdform::Result<()> {
    let groups = load_groups(&schema_path)?;

    let values: SubmittedValues = serde_json::from_slice(&fs::read(&values_path)?).map_err(|e| {
        xsdform::Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    let errors = validate(&groups, &values);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{}", error);
        }
        std::process::exit(2);
    }

    let document = DocumentGenerator::new().generate(&groups, &values)?;
    match output {
        Some(path) => fs::write(path, document)?,
        None => print!("{}", String::from_utf8_lossy(&document)),
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("xsdform was built without the 'cli' feature");
    eprintln!("Rebuild with: cargo build --features cli");
    std::process::exit(1);
}
