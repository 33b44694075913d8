/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `auth` — login, logout and whoami
- `pets` — inventory listing and record management

Handlers are intentionally small: they wire the library components
(`PetstoreClient`, `SessionGate`) together and render the results.
*/

pub mod auth;
pub mod pets;
