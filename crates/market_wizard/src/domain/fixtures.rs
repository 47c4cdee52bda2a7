//! Static fixture dataset (users, groups, markets).
//!
//! Stands in for a data service; the wizard only needs lookups by id, e.g. to
//! check that a group audience points at an existing group.

use lazy_static::lazy_static;
use serde::Serialize;

use crate::domain::draft::{MarketType, Visibility};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: &'static str,
    pub name: &'static str,
    pub handle: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: &'static str,
    pub name: &'static str,
    pub visibility: Visibility,
    pub members: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Market {
    pub id: &'static str,
    pub title: &'static str,
    pub market_type: MarketType,
    pub group_id: Option<&'static str>,
    pub buy_in: u32,
}

#[derive(Debug, Default)]
pub struct Fixtures {
    pub users: Vec<User>,
    pub groups: Vec<Group>,
    pub markets: Vec<Market>,
}

lazy_static! {
    static ref BUILTIN: Fixtures = Fixtures {
        users: vec![
            User { id: "u1", name: "Alex Rivera", handle: "alex" },
            User { id: "u2", name: "Sam Okafor", handle: "samo" },
            User { id: "u3", name: "Jordan Lee", handle: "jlee" },
        ],
        groups: vec![
            Group {
                id: "g1",
                name: "Office League",
                visibility: Visibility::Private,
                members: vec!["u1", "u2"],
            },
            Group {
                id: "g2",
                name: "Weekend Crew",
                visibility: Visibility::Public,
                members: vec!["u1", "u2", "u3"],
            },
        ],
        markets: vec![
            Market {
                id: "m1",
                title: "Who arrives last on Friday?",
                market_type: MarketType::Ladder,
                group_id: Some("g1"),
                buy_in: 100,
            },
            Market {
                id: "m2",
                title: "Best hiking route",
                market_type: MarketType::Poll,
                group_id: Some("g2"),
                buy_in: 500,
            },
            Market {
                id: "m3",
                title: "Split or steal",
                market_type: MarketType::Betrayal,
                group_id: None,
                buy_in: 250,
            },
        ],
    };
}

impl Fixtures {
    pub fn builtin() -> &'static Fixtures {
        &BUILTIN
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn find_market(&self, id: &str) -> Option<&Market> {
        self.markets.iter().find(|m| m.id == id)
    }

    pub fn markets_in_group<'a>(&'a self, group_id: &'a str) -> impl Iterator<Item = &'a Market> {
        self.markets
            .iter()
            .filter(move |m| m.group_id == Some(group_id))
    }
}
