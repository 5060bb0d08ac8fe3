use crate::demo::{
    list_forms, list_landing_pages, render_landing_page, run_demo, run_submit, show_form,
    DemoArgs, LandingRenderArgs, SubmitArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use quote_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Quote Desk",
    about = "Serve and exercise the brokerage's quote forms, intake API, and landing pages",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the quote form catalog
    Forms {
        #[command(subcommand)]
        command: FormsCommand,
    },
    /// Inspect or render landing pages
    Landing {
        #[command(subcommand)]
        command: LandingCommand,
    },
    /// Fill in a quote form from the command line and submit it
    Submit(SubmitArgs),
    /// Walk several quote wizards end to end against an in-process backend
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum FormsCommand {
    /// List every form with its endpoint and step count
    List,
    /// Print one form's steps and fields
    Show {
        /// Form key, e.g. commercial-auto
        form: String,
    },
}

#[derive(Subcommand, Debug)]
enum LandingCommand {
    /// List every landing page
    List,
    /// Render one landing page to HTML
    Render(LandingRenderArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Forms {
            command: FormsCommand::List,
        } => {
            list_forms();
            Ok(())
        }
        Command::Forms {
            command: FormsCommand::Show { form },
        } => show_form(&form),
        Command::Landing {
            command: LandingCommand::List,
        } => {
            list_landing_pages();
            Ok(())
        }
        Command::Landing {
            command: LandingCommand::Render(args),
        } => render_landing_page(args),
        Command::Submit(args) => run_submit(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["quote-desk-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn submit_collects_repeated_assignments() {
        let cli = Cli::try_parse_from([
            "quote-desk-api",
            "submit",
            "--form",
            "commercial-auto",
            "--field",
            "business_name=Lone Star Hauling",
            "--field",
            "email=rosa@lonestarhauling.com",
            "--item",
            "vehicles[1].make=Isuzu",
        ])
        .expect("parses");

        let Some(Command::Submit(args)) = cli.command else {
            panic!("expected submit command");
        };
        assert_eq!(args.form, "commercial-auto");
        assert_eq!(args.fields.len(), 2);
        assert_eq!(args.fields[0].0, "business_name");
        assert_eq!(args.items[0].index, 1);
        assert!(!args.remote);
    }

    #[test]
    fn malformed_assignments_are_rejected_by_the_parser() {
        let result = Cli::try_parse_from([
            "quote-desk-api",
            "submit",
            "--form",
            "home",
            "--field",
            "no-equals-sign",
        ]);
        assert!(result.is_err());
    }
}
