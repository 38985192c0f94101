//! 命令解析

use anyhow::{anyhow, bail, Result};
use storefront_core::services::SignupForm;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate to a link such as `/all-products?q=phone&page=2`.
    Open(String),
    /// Jump to a 1-based page of the current listing.
    Page(u64),
    Next,
    Prev,
    Search(String),
    Category { id: String, name: String },
    Back,
    Forward,
    Reload,
    Login { email: String, password: String },
    Signup(SignupForm),
    Logout,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  open <link>                          navigate, e.g. open /all-products?page=2
  page <n> | next | prev               move through the current listing
  search [keyword]                     search products (blank lists everything)
  category <id> [name]                 products of one category
  back | forward | reload
  login <email> <password>
  signup <email> <password> <confirm> <full name>
  logout
  help | quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(v, r)| (v, r.trim()));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "open" | "go" => Self::Open(required(rest, "link")?.to_string()),
            "page" => {
                let n = required(rest, "page number")?;
                Self::Page(n.parse().map_err(|_| anyhow!("Not a page number: {n}"))?)
            }
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "search" | "s" => Self::Search(rest.to_string()),
            "category" | "c" => {
                let id = required(args.first().copied().unwrap_or_default(), "category id")?;
                Self::Category {
                    id: id.to_string(),
                    name: args[1..].join(" "),
                }
            }
            "back" => Self::Back,
            "forward" => Self::Forward,
            "reload" | "r" => Self::Reload,
            "login" => match args.as_slice() {
                [email, password] => Self::Login {
                    email: (*email).to_string(),
                    password: (*password).to_string(),
                },
                _ => bail!("Usage: login <email> <password>"),
            },
            "signup" => match args.as_slice() {
                [email, password, confirm, name @ ..] if !name.is_empty() => {
                    Self::Signup(SignupForm {
                        full_name: name.join(" "),
                        email: (*email).to_string(),
                        password: (*password).to_string(),
                        confirm_password: (*confirm).to_string(),
                    })
                }
                _ => bail!("Usage: signup <email> <password> <confirm> <full name>"),
            },
            "logout" => Self::Logout,
            "help" | "?" | "" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => bail!("Unknown command: {other} (try `help`)"),
        };
        Ok(command)
    }
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    if value.is_empty() {
        bail!("Missing {what}");
    }
    Ok(value)
}
