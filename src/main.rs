use clap::{Parser, Subcommand};

use anyhow::Context;
use cloneform::Result;
use cloneform::diagnostics;
use cloneform::layout;
use cloneform::render::{HtmlInputRenderer, RecordingAssets, render_page};
use cloneform::spec::{FieldsetSpec, ValidatedFieldset};
use cloneform::{BindableModel, FormContext, GridFieldsetComposer};

#[derive(Parser)]
#[command(name = "cloneform")]
#[command(about = "Clonable grid fieldset renderer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a fieldset (validates the configuration while running).
    Render {
        #[arg(long)]
        config: String,

        /// Id of the form the fieldset is rendered into.
        #[arg(long, default_value = "w0")]
        form_id: String,

        /// Wrap the fieldset in a standalone HTML page.
        #[arg(long)]
        page: bool,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// Print where each attribute lands on the grid.
    Layout {
        #[arg(long)]
        config: String,
    },
}

fn load(path: &str) -> Result<ValidatedFieldset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read fieldset config {}", path)))?;
    FieldsetSpec::from_json(&text)?.validate_and_build()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Render {
            config,
            form_id,
            page,
            out,
        } => {
            // 1) Parse + validate the fieldset configuration.
            let ValidatedFieldset { config, model } = load(&config)?;

            // 2) Build the composer; refuses to go on without a usable model.
            let model = model.as_ref().map(|m| m as &dyn BindableModel);
            let composer = GridFieldsetComposer::new(config, model)?;

            // 3) Render.
            let form = FormContext::new(form_id);
            let mut assets = RecordingAssets::default();
            let html = composer.render(&form, &HtmlInputRenderer, &mut assets)?;
            let html = if page {
                render_page(composer.widget_id(), &form.id, &html, assets.is_registered())
            } else {
                html
            };

            match out {
                Some(out) => {
                    std::fs::write(&out, html)?;
                    println!("Wrote {}", out);
                }
                None => println!("{}", html),
            }
        }
        Commands::Layout { config } => {
            let ValidatedFieldset { config, .. } = load(&config)?;
            println!("row\tcolumn\tindex\twidth\tattribute");
            for cell in layout::partition(&config.attributes, config.grid.columns)
                .iter()
                .flatten()
            {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    cell.row, cell.column, cell.index, cell.width, cell.name
                );
            }
        }
    }

    Ok(())
}
