use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use posts_client::{Author, ListPostsResponse, Post, PostDraft, PostsClient, PostsClientError};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "POSTS_SERVER";

#[derive(Debug, Parser)]
#[command(name = "posts-cli", version, about = "Command line client for posts-server")]
struct Cli {
    /// Server address. Falls back to $POSTS_SERVER, then http://127.0.0.1:8080.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Args)]
struct DraftArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    content: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
}

impl From<DraftArgs> for PostDraft {
    fn from(args: DraftArgs) -> Self {
        Self {
            title: args.title,
            content: args.content,
            author: Author::new(args.first_name, args.last_name),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every post.
    List,
    /// Show one post.
    Get {
        #[arg(long)]
        id: String,
    },
    /// Create a post.
    Create {
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Replace title, content and author of a post.
    Replace {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Delete a post. Succeeds when the post is already gone.
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    let client = PostsClient::new(server).map_err(map_client_error)?;

    match cli.command {
        Command::List => {
            let list = client.list_posts().await.map_err(map_client_error)?;
            print_list(&list);
        }
        Command::Get { id } => {
            let post = client.get_post(&id).await.map_err(map_client_error)?;
            print_post("Post", &post);
        }
        Command::Create { draft } => {
            let post = client
                .create_post(&draft.into())
                .await
                .map_err(map_client_error)?;
            print_post("Post created", &post);
        }
        Command::Replace { id, draft } => {
            let post = client
                .replace_post(&id, &draft.into())
                .await
                .map_err(map_client_error)?;
            print_post("Post replaced", &post);
        }
        Command::Delete { id } => {
            client.delete_post(&id).await.map_err(map_client_error)?;
            println!("Post deleted: id={id}");
        }
    }

    Ok(())
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw.trim().to_string())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: PostsClientError) -> anyhow::Error {
    let message = match err {
        PostsClientError::NotFound => "post not found".to_string(),
        PostsClientError::InvalidRequest(message) => format!("invalid request: {message}"),
        PostsClientError::Server(message) => format!("server error: {message}"),
        PostsClientError::Http(err) => format!("http error: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_post(heading: &str, post: &Post) {
    println!("{heading}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("content: {}", post.content);
    println!("author: {}", post.author);
    println!("created: {}", post.created);
}

fn print_list(list: &ListPostsResponse) {
    println!("Posts: {}", list.posts.len());

    for post in &list.posts {
        println!("- [{}] {} ({})", post.id, post.title, post.author);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn resolve_server_defaults_when_nothing_given() {
        assert_eq!(resolve_server(None, None), DEFAULT_SERVER);
        assert_eq!(resolve_server(None, Some("  ".to_string())), DEFAULT_SERVER);
    }

    #[test]
    fn resolve_server_prefers_flag_over_env() {
        let s = resolve_server(
            Some("localhost:9999".to_string()),
            Some("http://env.test".to_string()),
        );
        assert_eq!(s, "http://localhost:9999");

        let s = resolve_server(None, Some("http://env.test".to_string()));
        assert_eq!(s, "http://env.test");
    }

    #[test]
    fn replace_parses_id_and_author_flags() {
        let cli = Cli::try_parse_from([
            "posts-cli",
            "replace",
            "--id",
            "65f1c0ffee0000000000abcd",
            "--title",
            "t",
            "--content",
            "c",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
        ])
        .expect("arguments must parse");

        match cli.command {
            Command::Replace { id, draft } => {
                assert_eq!(id, "65f1c0ffee0000000000abcd");
                let draft = PostDraft::from(draft);
                assert_eq!(draft.author, Author::new("Ada", "Lovelace"));
            }
            other => panic!("expected replace, got {other:?}"),
        }
    }

    #[test]
    fn create_requires_author_names() {
        let err = Cli::try_parse_from(["posts-cli", "create", "--title", "t", "--content", "c"]);
        assert!(err.is_err());
    }
}
