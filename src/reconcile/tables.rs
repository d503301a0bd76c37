//! The three normalization targets, expressed as data. Candidate lists
//! mirror the column-name drift accumulated across upstream spreadsheet
//! revisions; touching parsing code should never be necessary to absorb a
//! renamed column.

use super::{FieldSpec, JunkRule, TableSpec};

pub static ASSETS: TableSpec = TableSpec {
    name: "assets",
    must_keys: &["file_key", "url", "key_for_assets", "file_name"],
    columns: &["file_key", "url"],
    fields: &[
        FieldSpec {
            name: "file_key",
            candidates: &["file_key", "key_for_assets", "key", "name", "category"],
            asset_url: false,
        },
        FieldSpec {
            name: "url",
            candidates: &["url", "path", "src", "file_name"],
            asset_url: true,
        },
    ],
    junk: &[JunkRule {
        conditions: &[
            ("file_key", &["file_key", "key_for_assets", "category"]),
            ("url", &["url", "file_name", "key_for_assets"]),
        ],
    }],
    required: &["file_key", "url"],
};

pub static SCHEDULE: TableSpec = TableSpec {
    name: "schedule",
    must_keys: &[
        "timetable1",
        "timetable2",
        "session_title",
        "session_title_filled",
        "track",
        "tags",
        "note",
    ],
    columns: &["start", "end", "title", "desc", "location"],
    fields: &[
        FieldSpec {
            name: "start",
            candidates: &["timetable1", "start"],
            asset_url: false,
        },
        FieldSpec {
            name: "end",
            candidates: &["timetable2", "end"],
            asset_url: false,
        },
        FieldSpec {
            name: "title",
            candidates: &["session_title_filled", "session_title", "title"],
            asset_url: false,
        },
        FieldSpec {
            name: "desc",
            candidates: &["tags", "note", "desc"],
            asset_url: false,
        },
        FieldSpec {
            name: "location",
            candidates: &["track", "location"],
            asset_url: false,
        },
    ],
    junk: &[
        JunkRule {
            conditions: &[("start", &["timetable1"]), ("end", &["timetable2"])],
        },
        JunkRule {
            conditions: &[("title", &["session_title", "session_title_filled"])],
        },
    ],
    required: &[],
};

pub static SPEAKERS: TableSpec = TableSpec {
    name: "speakers",
    must_keys: &["order", "name_jp", "affiliation", "title1", "bio_ja", "photo_file"],
    columns: &["id", "name", "title", "org", "bio", "photo_url"],
    fields: &[
        FieldSpec {
            name: "id",
            candidates: &["order", "id"],
            asset_url: false,
        },
        FieldSpec {
            name: "name",
            candidates: &["name_jp", "name", "speaker"],
            asset_url: false,
        },
        FieldSpec {
            name: "title",
            candidates: &["title1", "title", "affiliation"],
            asset_url: false,
        },
        FieldSpec {
            name: "org",
            candidates: &["affiliation", "org"],
            asset_url: false,
        },
        FieldSpec {
            name: "bio",
            candidates: &["bio_ja", "bio"],
            asset_url: false,
        },
        FieldSpec {
            name: "photo_url",
            candidates: &["photo_url", "photo_file", "image"],
            asset_url: true,
        },
    ],
    junk: &[JunkRule {
        conditions: &[
            ("name", &["name_jp", "name", "speaker"]),
            ("photo_url", &["photo_file", "photo_url", "image"]),
        ],
    }],
    required: &[],
};
