//! Catalog queries issued while building a record
//!
//! Paths address the `-listxml` layout: `/mame/machine[@name=...]` with
//! `rom`, `disk`, `device_ref`, `driver` and `input` children.

use crate::traits::CatalogQuery;

/// Selects the machine only when at least one ROM carries a sha1
pub const DUMPED: CatalogQuery = CatalogQuery {
    name: "dumped",
    select: "/mame/machine[@name={item}][rom[@sha1]]",
    value: "@name",
};

pub const DESCRIPTION: CatalogQuery = CatalogQuery {
    name: "description",
    select: "/mame/machine[@name={item}]/description",
    value: ".",
};

pub const MANUFACTURER: CatalogQuery = CatalogQuery {
    name: "manufacturer",
    select: "/mame/machine[@name={item}]/manufacturer",
    value: ".",
};

pub const YEAR: CatalogQuery = CatalogQuery {
    name: "year",
    select: "/mame/machine[@name={item}]/year",
    value: ".",
};

pub const DRIVER_STATUS: CatalogQuery = CatalogQuery {
    name: "driver_status",
    select: "/mame/machine[@name={item}]/driver",
    value: "@status",
};

pub const EMULATION: CatalogQuery = CatalogQuery {
    name: "emulation",
    select: "/mame/machine[@name={item}]/driver",
    value: "@emulation",
};

pub const IS_BIOS: CatalogQuery = CatalogQuery {
    name: "is_bios",
    select: "/mame/machine[@name={item}][@isbios='yes']",
    value: "@name",
};

pub const IS_DEVICE: CatalogQuery = CatalogQuery {
    name: "is_device",
    select: "/mame/machine[@name={item}][@isdevice='yes']",
    value: "@name",
};

pub const IS_MECHANICAL: CatalogQuery = CatalogQuery {
    name: "is_mechanical",
    select: "/mame/machine[@name={item}][@ismechanical='yes']",
    value: "@name",
};

pub const COIN_SLOTS: CatalogQuery = CatalogQuery {
    name: "coin_slots",
    select: "/mame/machine[@name={item}]/input[@coins]",
    value: "@coins",
};

pub const DEVICE_REFS: CatalogQuery = CatalogQuery {
    name: "device_refs",
    select: "/mame/machine[@name={item}]/device_ref",
    value: "@name",
};

pub const ROMOF: CatalogQuery = CatalogQuery {
    name: "romof",
    select: "/mame/machine[@name={item}][@romof]",
    value: "@romof",
};

pub const CLONEOF: CatalogQuery = CatalogQuery {
    name: "cloneof",
    select: "/mame/machine[@name={item}][@cloneof]",
    value: "@cloneof",
};

pub const SAMPLEOF: CatalogQuery = CatalogQuery {
    name: "sampleof",
    select: "/mame/machine[@name={item}][@sampleof]",
    value: "@sampleof",
};

/// Disks with a sha1; undumped (`status="nodump"`) disks carry none
pub const DISKS: CatalogQuery = CatalogQuery {
    name: "disks",
    select: "/mame/machine[@name={item}]/disk[@sha1]",
    value: "@name",
};
