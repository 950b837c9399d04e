/*!
# Spreadsheet CRUD Service

A small CRUD dashboard backend, built in Rust: tabular records live in
xlsx spreadsheet files on the server and are listed, searched, sorted,
paginated, edited, and exported through a thin REST-like API.

## Overview

Each dataset is one spreadsheet file in an uploads directory. The first
sheet's first row is the header; every later row is a record keyed by
column name, with `Cmdb_id` as the unique record identifier. There is no
database and no cache: every request re-reads the backing file, and
every mutation rewrites it in full.

## Architecture

The service follows a request/response architecture:

### HTTP Layer
- **Technologies**: Rust, axum, tokio
- **Endpoints**:
  - `/crud` - List (with search/sort/pagination), get-by-id, create,
    update, delete
  - `/download` - Raw xlsx export of a dataset
  - `/` - Minimal landing page describing the API

### Core Components
- File Locator - Maps a logical dataset name to a file on disk with
  case-insensitive partial matching
- Spreadsheet Codec - Parses xlsx into headers + records and serializes
  them back
- Query Pipeline - Pure search -> sort -> paginate functions over a
  record list
- Record Store - Orchestrates locator and codec to implement the CRUD
  operations and the id invariants

### Data Persistence Layer
- One xlsx file per dataset, first sheet only
- Whole-file rewrite on every mutation (single-writer assumption; two
  concurrent writers to one dataset can lose an update)

## Modules

- **record**: Record type, id field, header label mapping
- **codec**: xlsx decode (calamine) and encode (rust_xlsxwriter)
- **locator**: dataset name to file path resolution
- **query**: search, natural-order sort, pagination
- **store**: `RecordStore` trait and the file-backed `FileStore`
- **error**: failure taxonomy shared across the crate
- **app**: axum routing and the JSON response envelope

## REST API Endpoints

- `GET /crud?fileName=&page=&limit=&keyword=&sortKey=&sortOrder=` - List
  a page of records; add `Cmdb_id=` to fetch a single record instead
- `POST /crud?fileName=` - Create a record; the server assigns `Cmdb_id`
- `PUT /crud?fileName=&Cmdb_id=` - Update a record; the body's id field
  is ignored
- `DELETE /crud?fileName=&Cmdb_id=` - Delete a record
- `GET /download?fileName=` - Download the backing xlsx file
*/

// Re-export all modules so they appear in the documentation
pub mod app;
pub mod codec;
pub mod error;
pub mod locator;
pub mod query;
pub mod record;
pub mod store;

/// Re-export everything from these modules to make it easier to use
pub use codec::*;
pub use error::*;
pub use locator::*;
pub use query::*;
pub use record::*;
pub use store::*;
