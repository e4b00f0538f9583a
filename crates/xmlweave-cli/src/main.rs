use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use xmlweave::{Field, Mapper, PathQuery, XmlSource};

#[derive(Debug, Parser)]
#[command(
    name = "xmlweave",
    version,
    about = "Map the bundled course-plan demo to XML, then edit and query it"
)]
struct Args {
    /// Slash-separated path query evaluated against the generated tree
    #[arg(short, long, value_name = "PATH")]
    query: Option<String>,
    /// Rename every element OLD to NEW before output
    #[arg(long, num_args = 2, value_names = ["OLD", "NEW"])]
    rename: Option<Vec<String>>,
    /// Add NAME="VALUE" to every element named ELEMENT before output
    #[arg(long, num_args = 3, value_names = ["ELEMENT", "NAME", "VALUE"])]
    annotate: Option<Vec<String>>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

struct Component {
    name: String,
    weight: u32,
}

impl XmlSource for Component {
    fn element_name(&self) -> &str {
        "component"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::attribute("name", self.name.clone()),
            Field::transformed("weight", self.weight.to_string(), "percentage"),
        ]
    }
}

struct Course {
    code: String,
    name: String,
    credits: f64,
    notes: String,
    assessment: Vec<Component>,
}

impl XmlSource for Course {
    fn element_name(&self) -> &str {
        "course"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::attribute("code", self.code.clone()),
            Field::attribute("name", self.name.clone()),
            Field::attribute("credits", self.credits.to_string()),
            Field::attribute("notes", self.notes.clone()).ignore(),
            Field::children(
                "assessment",
                self.assessment
                    .iter()
                    .map(|c| c as &dyn XmlSource)
                    .collect(),
            ),
        ]
    }
}

fn sample_course() -> Course {
    Course {
        code: "M4310".to_string(),
        name: "Advanced Programming".to_string(),
        credits: 6.0,
        notes: "not rendered".to_string(),
        assessment: vec![
            Component {
                name: "Quizzes".to_string(),
                weight: 20,
            },
            Component {
                name: "Project".to_string(),
                weight: 80,
            },
        ],
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let course = sample_course();
    let mut document = Mapper::new()
        .map_to_document(&course)
        .context("failed to map the demo object graph")?;

    if let Some(rename) = &args.rename {
        match rename.as_slice() {
            [old, new] => {
                document
                    .rename_elements_global(old, new)
                    .context("failed to rename elements")?;
            }
            _ => bail!("--rename takes exactly OLD and NEW"),
        }
    }

    if let Some(annotate) = &args.annotate {
        match annotate.as_slice() {
            [element, name, value] => {
                document
                    .add_attributes_global(element, name, value)
                    .context("failed to add attributes")?;
            }
            _ => bail!("--annotate takes exactly ELEMENT, NAME and VALUE"),
        }
    }

    let output = match &args.query {
        Some(expression) => PathQuery::new(&document)
            .evaluate_to_string(expression)
            .with_context(|| format!("failed to evaluate path query `{expression}`"))?,
        None => document.pretty_print(),
    };

    write_output(&args.output, output.as_bytes())
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
