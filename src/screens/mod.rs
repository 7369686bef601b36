//! Screen-navigation state machine.
//!
//! The host UI shows whatever screen is on top of a [`ScreenStack`]. Screens
//! hold only the data they render; the map screen additionally owns the
//! geocoding batch for its contact, so popping it abandons the batch.

mod contact_map;

pub use contact_map::{ContactMap, MapRow};

use log::debug;

use crate::contact_types::{Address, Contact, NavigationRequest};
use crate::errors::Error;
use crate::search::Snapshot;
use crate::store::access::StoreAccess;

/// One UI state.
#[derive(Debug)]
pub enum Screen {
    Home,
    Search { query: String, results: Snapshot },
    Settings { starred_only: bool },
    About,
    ContactMap(ContactMap),
    DestinationInfo { contact: Contact, address: Address },
    MissingPermission { reason: String },
    Error { message: String },
}

impl Screen {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Search { .. } => "search",
            Screen::Settings { .. } => "settings",
            Screen::About => "about",
            Screen::ContactMap(_) => "contact_map",
            Screen::DestinationInfo { .. } => "destination_info",
            Screen::MissingPermission { .. } => "missing_permission",
            Screen::Error { .. } => "error",
        }
    }

    /// Header text.
    pub fn title(&self) -> String {
        match self {
            Screen::Home => "Nav2Contacts".to_string(),
            Screen::Search { .. } => "Search contact".to_string(),
            Screen::Settings { .. } => "Settings".to_string(),
            Screen::About => "About".to_string(),
            Screen::ContactMap(map) => map.contact().name.clone(),
            Screen::DestinationInfo { contact, address } => {
                format!("Navigate to {}\n{}", contact.name, address.label())
            }
            Screen::MissingPermission { .. } => "Permission required".to_string(),
            Screen::Error { .. } => "Error".to_string(),
        }
    }

    /// Destination screen for `address` of `contact`.
    pub fn destination(contact: &Contact, address: &Address) -> Self {
        Screen::DestinationInfo {
            contact: contact.clone(),
            address: address.clone(),
        }
    }

    /// Navigation request for a destination screen.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` on any other screen, `Error::UnresolvedAddress`
    /// if the address has no coordinates.
    pub fn navigation_request(&self) -> Result<NavigationRequest, Error> {
        match self {
            Screen::DestinationInfo { address, .. } => NavigationRequest::for_address(address),
            other => Err(Error::InvalidInput(format!(
                "no destination on the {} screen",
                other.kind()
            ))),
        }
    }
}

/// Stack of screens; the bottom screen is never popped.
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Screen>,
}

impl ScreenStack {
    pub fn new(root: Screen) -> Self {
        Self {
            screens: vec![root],
        }
    }

    /// Root screen for the given store access: home, or the permission screen.
    pub fn for_access(access: &StoreAccess) -> Self {
        match access {
            StoreAccess::Granted => Self::new(Screen::Home),
            StoreAccess::Denied(reason) => Self::new(Screen::MissingPermission {
                reason: reason.clone(),
            }),
        }
    }

    pub fn push(&mut self, screen: Screen) {
        debug!(
            "event=screen_push screen={} depth={}",
            screen.kind(),
            self.screens.len() + 1
        );
        self.screens.push(screen);
    }

    /// Pop the top screen. Returns `None` when only the root is left.
    pub fn pop(&mut self) -> Option<Screen> {
        if self.screens.len() <= 1 {
            return None;
        }
        let screen = self.screens.pop();
        if let Some(screen) = &screen {
            debug!(
                "event=screen_pop screen={} depth={}",
                screen.kind(),
                self.screens.len()
            );
        }
        screen
    }

    /// Pop screens until the root is on top.
    pub fn pop_to_root(&mut self) {
        self.screens.truncate(1);
    }

    /// Replace the top screen, returning the old one.
    pub fn replace_top(&mut self, screen: Screen) -> Screen {
        let top = self.screens.len() - 1;
        std::mem::replace(&mut self.screens[top], screen)
    }

    pub fn top(&self) -> &Screen {
        &self.screens[self.screens.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut Screen {
        let top = self.screens.len() - 1;
        &mut self.screens[top]
    }

    pub fn depth(&self) -> usize {
        self.screens.len()
    }
}
