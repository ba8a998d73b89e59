// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session state shared by the request pipeline and the router

mod store;

pub use store::{CookieCredentialStore, CredentialStore, MemoryCredentialStore, USER_TOKEN_COOKIE};
