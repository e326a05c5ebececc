use doormap::{Door, DoorMap};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub index: u32,
    pub name: String,
    pub data: String,
}

impl Record {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            name: format!("name{}", index),
            data: format!("data{}", index),
        }
    }
}

/// Doors on `index` and `name`.
pub fn record_doors() -> Vec<Door<Record>> {
    vec![
        Door::named("index", |r: &Record| r.index),
        Door::named("name", |r: &Record| r.name.clone()),
    ]
}

/// Builds a map holding records `0..size`.
pub fn record_map(size: usize) -> DoorMap<Record> {
    DoorMap::from_items(record_doors(), (0..size as u32).map(Record::new))
}
