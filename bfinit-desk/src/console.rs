//! Console command parsing

use rust_decimal::Decimal;

use crate::listing::Tab;

pub const HELP: &str = "\
commands:
  login <email> <password>   sign in and keep the token
  logout                     sign out
  tab online|manual          switch order tab
  show                       print the current page
  page <n> | next | prev     move between pages
  size <5|10|25|50|100>      rows per page
  select <id> <status>       pick a new status for a row
  confirm <id> | cancel <id> send or drop the pending status
  retry                      fetch the active tab again
  stats                      order counters
  details <id>               online order details
  payments [legacy]          Bitss payments (or the legacy list)
  pay <id>                   mark a Bitss payment paid
  products [search]          product list
  product-price <id> <price> change a product's price
  categories                 category list
  catalog                    categories with their products
  category-add <name> [text] create an active category
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Logout,
    Tab(Tab),
    Show,
    Page(usize),
    Next,
    Prev,
    Size(usize),
    Select { id: String, status: String },
    Confirm(String),
    Cancel(String),
    Retry,
    Stats,
    Details(String),
    Payments { legacy: bool },
    Pay(String),
    Products(Option<String>),
    ProductPrice { id: String, price: Decimal },
    Categories,
    Catalog,
    CategoryAdd { name: String, description: String },
    Help,
    Quit,
}

impl Command {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();

        let command = match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
            ("login", [email, password]) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("logout", []) => Command::Logout,
            ("tab", [tab]) => Command::Tab(tab.parse()?),
            ("show" | "ls", []) => Command::Show,
            ("page", [n]) => Command::Page(number(n)?),
            ("next", []) => Command::Next,
            ("prev", []) => Command::Prev,
            ("size", [n]) => Command::Size(number(n)?),
            ("select", [id, status]) => Command::Select {
                id: id.to_string(),
                status: status.to_string(),
            },
            ("confirm", [id]) => Command::Confirm(id.to_string()),
            ("cancel", [id]) => Command::Cancel(id.to_string()),
            ("retry", []) => Command::Retry,
            ("stats", []) => Command::Stats,
            ("details", [id]) => Command::Details(id.to_string()),
            ("payments", []) => Command::Payments { legacy: false },
            ("payments", ["legacy"]) => Command::Payments { legacy: true },
            ("pay", [id]) => Command::Pay(id.to_string()),
            ("products", []) => Command::Products(None),
            ("products", terms) => Command::Products(Some(terms.join(" "))),
            ("product-price", [id, price]) => Command::ProductPrice {
                id: id.to_string(),
                price: price.parse().map_err(|_| format!("not a price: {}", price))?,
            },
            ("categories", []) => Command::Categories,
            ("catalog", []) => Command::Catalog,
            ("category-add", [name, description @ ..]) => Command::CategoryAdd {
                name: name.to_string(),
                description: description.join(" "),
            },
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            (other, _) => return Err(format!("cannot parse `{}`; try `help`", other)),
        };
        Ok(Some(command))
    }
}

fn number(s: &str) -> Result<usize, String> {
    s.parse().map_err(|_| format!("not a number: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(Command::parse("tab Manual").unwrap(), Some(Command::Tab(Tab::Manual)));
        assert_eq!(Command::parse("size 25").unwrap(), Some(Command::Size(25)));
        assert_eq!(
            Command::parse("select m1 cancle").unwrap(),
            Some(Command::Select { id: "m1".into(), status: "cancle".into() })
        );
        assert_eq!(
            Command::parse("products office suite").unwrap(),
            Some(Command::Products(Some("office suite".into())))
        );
        assert_eq!(
            Command::parse("payments legacy").unwrap(),
            Some(Command::Payments { legacy: true })
        );
        assert_eq!(
            Command::parse("product-price p1 19.99").unwrap(),
            Some(Command::ProductPrice { id: "p1".into(), price: Decimal::new(1999, 2) })
        );
        assert_eq!(
            Command::parse("category-add Security Antivirus and more").unwrap(),
            Some(Command::CategoryAdd {
                name: "Security".into(),
                description: "Antivirus and more".into()
            })
        );
        assert_eq!(Command::parse("catalog").unwrap(), Some(Command::Catalog));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("page two").is_err());
        assert!(Command::parse("tab archive").is_err());
        assert!(Command::parse("confirm").is_err());
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("product-price p1 cheap").is_err());
        assert!(Command::parse("category-add").is_err());
    }
}
