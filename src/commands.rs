//! Command handlers for the nav2contacts CLI.

use std::process::ExitCode;
use std::sync::Arc;

use nav2contacts::config::Config;
use nav2contacts::contact_types::Coordinates;
use nav2contacts::directory::Directory;
use nav2contacts::errors::Error;
use nav2contacts::geo::{Geocoder, HttpGeocoder};
use nav2contacts::screens::{ContactMap, Screen, ScreenStack};
use nav2contacts::store::access::check_access;
use nav2contacts::store::{ContactStore, seed};

use crate::output::*;

/// Commands supported by the nav2contacts CLI.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// List every contact with a postal address
    Read,
    /// Live search by display name (at most 6 results; blank lists favourites)
    Search {
        /// Case-sensitive text contained in the display name
        #[arg(default_value = "")]
        text: String,
    },
    /// Geocode a contact's addresses and show them relative to a location
    Show {
        /// Exact display name
        name: String,

        /// Current location as "LAT,LON"
        #[arg(long, value_parser = parse_coordinates)]
        from: Option<Coordinates>,
    },
    /// Print the navigation URI for one of a contact's addresses
    Navigate {
        /// Exact display name
        name: String,

        /// 1-based address number as listed by `show`
        #[arg(short = 'i', long, default_value = "1")]
        index: usize,
    },
    /// Show or change the starred-only filter
    Settings {
        /// Only show starred contacts in the read view and in searches
        #[arg(long)]
        starred_only: Option<bool>,
    },
    /// Insert demo contacts into the store
    Seed,
    Version,
}

fn parse_coordinates(text: &str) -> Result<Coordinates, String> {
    Coordinates::parse(text).ok_or_else(|| format!("expected LAT,LON in degrees, got {text:?}"))
}

/// Execute a CLI command.
pub fn execute(command: &Commands, config: &Config, json: bool) -> Result<ExitCode, Error> {
    match command {
        Commands::Read => handle_read(config, json),
        Commands::Search { text } => handle_search(config, text, json),
        Commands::Show { name, from } => handle_show(config, name, *from, json),
        Commands::Navigate { name, index } => handle_navigate(config, name, *index, json),
        Commands::Settings { starred_only } => handle_settings(config, *starred_only, json),
        Commands::Seed => handle_seed(config, json),
        Commands::Version => handle_version(json),
    }
}

/// Check store access and open the directory, or fail with the reason the
/// missing-permission screen would show.
fn open_directory(config: &Config) -> Result<(Directory, ScreenStack), Error> {
    let access = check_access(&config.database_path);
    let stack = ScreenStack::for_access(&access);
    if let Screen::MissingPermission { reason } = stack.top() {
        return Err(Error::PermissionDenied {
            path: config.database_path.clone(),
            reason: reason.clone(),
        });
    }
    let store = ContactStore::open(&config.database_path)?;
    Ok((Directory::new(store), stack))
}

fn geocoder(config: &Config) -> Result<Arc<dyn Geocoder>, Error> {
    Ok(Arc::new(HttpGeocoder::new(
        &config.geocoder_url,
        config.geocoder_timeout(),
    )?))
}

fn handle_read(config: &Config, json: bool) -> Result<ExitCode, Error> {
    let (directory, _) = open_directory(config)?;
    let contacts = directory.read();
    if json {
        print_json(&ReadResponse {
            starred_only: directory.store().starred_only(),
            contacts: contacts.iter().map(ContactItem::from).collect(),
        });
    } else {
        print_contacts(&contacts);
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_search(config: &Config, text: &str, json: bool) -> Result<ExitCode, Error> {
    let (directory, _) = open_directory(config)?;
    let results = directory.search(text);
    if json {
        print_json(&SearchResponse {
            query: text.to_string(),
            contacts: results.iter().map(ContactItem::from).collect(),
        });
    } else {
        print_contacts(&results);
    }
    Ok(ExitCode::SUCCESS)
}

/// Walk home -> search -> map for `name` and wait for geocoding.
fn open_contact_map(config: &Config, name: &str) -> Result<ScreenStack, Error> {
    let (directory, mut stack) = open_directory(config)?;
    stack.push(Screen::Search {
        query: name.to_string(),
        results: directory.search(name),
    });

    let contact = directory.contact(name)?;
    let mut map = ContactMap::open(contact, geocoder(config)?)?;
    map.wait();
    stack.push(Screen::ContactMap(map));
    Ok(stack)
}

fn handle_show(
    config: &Config,
    name: &str,
    from: Option<Coordinates>,
    json: bool,
) -> Result<ExitCode, Error> {
    let stack = open_contact_map(config, name)?;
    let Screen::ContactMap(map) = stack.top() else {
        return Err(Error::InvalidInput("map screen not shown".into()));
    };

    let rows = map.rows(from);
    if json {
        print_json(&ShowResponse {
            name: map.contact().name.clone(),
            starred: map.contact().starred,
            rows,
        });
    } else {
        println!("{}", stack.top().title());
        for row in rows {
            let location = match (row.coordinates, row.distance_km) {
                (Some(_), Some(km)) => format_distance(km),
                (Some(c), None) => format!("{:.5},{:.5}", c.latitude, c.longitude),
                (None, _) => "location unknown".to_string(),
            };
            println!("  {}. {} · {}", row.marker, row.title, location);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_navigate(
    config: &Config,
    name: &str,
    index: usize,
    json: bool,
) -> Result<ExitCode, Error> {
    let mut stack = open_contact_map(config, name)?;
    let destination = match stack.top() {
        Screen::ContactMap(map) => {
            let address = map.address(index).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "{name} has {} address(es); no address {index}",
                    map.contact().addresses.len()
                ))
            })?;
            Screen::destination(map.contact(), address)
        }
        _ => return Err(Error::InvalidInput("map screen not shown".into())),
    };
    stack.push(destination);

    let request = stack.top().navigation_request()?;
    if json {
        let address = match stack.top() {
            Screen::DestinationInfo { address, .. } => address.to_string(),
            _ => String::new(),
        };
        print_json(&NavigateResponse {
            name: name.to_string(),
            address,
            uri: request.uri(),
        });
    } else {
        println!("{}", stack.top().title());
        println!("{}", request.uri());
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_settings(
    config: &Config,
    starred_only: Option<bool>,
    json: bool,
) -> Result<ExitCode, Error> {
    let current = match starred_only {
        Some(value) => {
            config.ensure_directories()?;
            let store = ContactStore::open(&config.database_path)?;
            store.set_starred_only(value)?;
            store.starred_only()
        }
        None => open_directory(config)?.0.store().starred_only(),
    };

    if json {
        print_json(&SettingsResponse {
            starred_only: current,
        });
    } else {
        println!("starred-only: {current}");
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_seed(config: &Config, json: bool) -> Result<ExitCode, Error> {
    config.ensure_directories()?;
    let store = ContactStore::open(&config.database_path)?;
    let rows = seed::seed_demo_contacts(&store)?;
    if json {
        print_json(&SeedResponse {
            status: "seeded".to_string(),
            rows,
        });
    } else {
        println!("Inserted {rows} demo address rows");
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_version(json: bool) -> Result<ExitCode, Error> {
    if json {
        print_json(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "name": env!("CARGO_PKG_NAME")
        }));
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            database_path: dir.path().join("contacts.db"),
            ..Config::default()
        }
    }

    #[test]
    fn test_read_without_store_is_permission_denied() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        assert!(matches!(
            execute(&Commands::Read, &config, true),
            Err(Error::PermissionDenied { .. })
        ));
    }

    #[test]
    fn test_seed_then_read_and_search() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        execute(&Commands::Seed, &config, true).unwrap();
        assert_eq!(execute(&Commands::Read, &config, true).unwrap(), ExitCode::SUCCESS);
        let search = Commands::Search {
            text: "Star".to_string(),
        };
        assert_eq!(execute(&search, &config, false).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let set = Commands::Settings {
            starred_only: Some(true),
        };
        execute(&set, &config, true).unwrap();

        let store = ContactStore::open(&config.database_path).unwrap();
        assert!(store.starred_only());
    }

    #[test]
    fn test_show_unknown_contact() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        execute(&Commands::Seed, &config, true).unwrap();

        let show = Commands::Show {
            name: "Nobody".to_string(),
            from: None,
        };
        assert!(matches!(
            execute(&show, &config, true),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_parse_coordinates_flag() {
        assert!(parse_coordinates("37.4,-122.1").is_ok());
        assert!(parse_coordinates("north").is_err());
    }
}
