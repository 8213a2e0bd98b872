//! Cranbrook Transit System (BC Transit agency 27).
//!
//! Every route runs out of the downtown exchange at 12th Ave N & Baker St
//! (stop 170545), and the feed publishes most runs as one trip per round
//! trip. The sequences below list just enough stops to tell the two halves
//! apart.

use crate::domain::DirectionKind;
use crate::store::{DirectionRecord, EntryRecord, RouteRecord};

use super::{AgencyTables, RouteType};

use EntryRecord::{Duplicate, Mandatory};

/// Downtown exchange, 12th Ave N at Baker St
const DOWNTOWN: &str = "170545";

pub(super) const TABLES: AgencyTables = AgencyTables {
    name: "Cranbrook Transit System",
    agency_id: "27",
    agency_color: "34B233",
    route_type: RouteType::Bus,
    route_colors: &[
        (1, "0D4C85"),
        (2, "86C636"),
        (3, "F18021"),
        (4, "03A14D"),
        (5, "FECE0E"),
        (7, "27A8DD"),
        (14, "E91A8B"),
        (20, "AC419C"),
    ],
    routes: ROUTES,
};

const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        route: 1,
        directions: [
            DirectionRecord {
                kind: DirectionKind::North,
                headsign: "Walmart",
                stops: &[
                    Mandatory(DOWNTOWN),
                    Mandatory("170509"), // Kootenay St N at Victoria Ave N
                    Duplicate("170427"), // 21st Ave N at Kootenay St N
                    Duplicate("170428"), // 12th St N at 21st Ave N
                    Duplicate("170429"), // Tamarack Mall access
                    Duplicate("170426"),
                    Mandatory("170424"),
                    Mandatory("170416"),
                    Duplicate("170538"), // 12th St N at mall access
                    Duplicate("170531"), // 12th St N at Kokanee Dr N
                    Mandatory("170409"), // Cranbrook Mall access road
                ],
            },
            DirectionRecord {
                kind: DirectionKind::South,
                headsign: "Downtown",
                stops: &[
                    Mandatory("170409"), // Cranbrook Mall access road
                    Mandatory("170407"), // Willowbrook Dr at Kokanee
                    Mandatory("170410"),
                    Mandatory("170405"),
                    Mandatory("170412"), // 30th at Mt Fisher Dr
                    Duplicate("170414"),
                    Mandatory("170425"), // Victoria Ave N at 8th St N
                    Duplicate("170427"),
                    Duplicate("170428"),
                    Mandatory("170530"), // Kokanee Dr N at 12th St N
                    Duplicate("170429"),
                    Mandatory("170426"),
                    Mandatory("170508"), // Kootenay St N at Victoria Ave N
                    Mandatory(DOWNTOWN),
                ],
            },
        ],
    },
    RouteRecord {
        route: 2,
        directions: [
            DirectionRecord {
                kind: DirectionKind::East,
                headsign: "Highlands",
                stops: &[
                    Mandatory(DOWNTOWN),
                    Mandatory("170524"),
                    Mandatory("170474"), // 30th Ave S at 7th St S
                ],
            },
            DirectionRecord {
                kind: DirectionKind::West,
                headsign: "Downtown",
                stops: &[
                    Mandatory("170474"),
                    Mandatory("170464"),
                    Mandatory(DOWNTOWN),
                ],
            },
        ],
    },
    RouteRecord {
        route: 3,
        directions: [
            DirectionRecord {
                kind: DirectionKind::East,
                headsign: "Downtown",
                stops: &[
                    Mandatory("170510"), // 11th St S at Innes Ave S
                    Mandatory("170490"),
                    Mandatory(DOWNTOWN),
                ],
            },
            DirectionRecord {
                kind: DirectionKind::West,
                headsign: "3rd Ave",
                stops: &[
                    Mandatory(DOWNTOWN),
                    Mandatory("170489"),
                    Mandatory("170510"),
                ],
            },
        ],
    },
    RouteRecord {
        route: 4,
        directions: [
            DirectionRecord {
                kind: DirectionKind::North,
                headsign: "Mission Pl",
                stops: &[
                    Mandatory(DOWNTOWN),
                    Mandatory("170502"),
                    Mandatory("570002"), // Mission Place
                ],
            },
            DirectionRecord {
                kind: DirectionKind::South,
                headsign: "Downtown",
                stops: &[
                    Mandatory("570002"),
                    Mandatory("170501"),
                    Mandatory(DOWNTOWN),
                ],
            },
        ],
    },
    RouteRecord {
        route: 5,
        directions: [
            DirectionRecord {
                kind: DirectionKind::East,
                headsign: "College",
                stops: &[
                    Mandatory(DOWNTOWN),
                    Mandatory("170443"),
                    Mandatory("170539"),
                    Mandatory("170431"), // College Way
                ],
            },
            DirectionRecord {
                kind: DirectionKind::West,
                headsign: "Downtown",
                stops: &[
                    Mandatory("170431"),
                    Mandatory("170445"),
                    Mandatory(DOWNTOWN),
                ],
            },
        ],
    },
    RouteRecord {
        route: 7,
        directions: [
            DirectionRecord {
                kind: DirectionKind::North,
                headsign: "Downtown",
                stops: &[
                    Mandatory("170002"), // 4th Ave S at Birch Dr
                    Mandatory("170479"),
                    Mandatory(DOWNTOWN),
                ],
            },
            DirectionRecord {
                kind: DirectionKind::South,
                headsign: "South",
                stops: &[
                    Mandatory(DOWNTOWN),
                    Mandatory("170514"),
                    Mandatory("170002"),
                ],
            },
        ],
    },
    RouteRecord {
        route: 14,
        directions: [
            DirectionRecord {
                kind: DirectionKind::North,
                headsign: "Downtown",
                stops: &[
                    Mandatory("170460"), // 20A St S at 14th Ave S
                    Mandatory("170537"),
                    Mandatory("170518"),
                    Mandatory("170541"),
                    Mandatory("170516"),
                    Mandatory(DOWNTOWN),
                ],
            },
            DirectionRecord {
                kind: DirectionKind::South,
                headsign: "South",
                stops: &[
                    Mandatory(DOWNTOWN),
                    Mandatory("170461"),
                    Mandatory("170460"),
                ],
            },
        ],
    },
    RouteRecord {
        route: 20,
        directions: [
            DirectionRecord {
                kind: DirectionKind::North,
                headsign: "Downtown",
                stops: &[
                    Mandatory("170002"),
                    Mandatory("170484"),
                    Mandatory(DOWNTOWN),
                ],
            },
            DirectionRecord {
                kind: DirectionKind::South,
                headsign: "South",
                stops: &[
                    Mandatory(DOWNTOWN),
                    Mandatory("170485"),
                    Mandatory("170002"),
                ],
            },
        ],
    },
];
