// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::ensure;
use crate::error::Error;
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub use crate::error::PANIC_ON_ERROR;

/// Day zero of the OLE Automation date scale.
pub const OA_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1899, 12, 30) {
    None => {
        panic!("Unreachable code")
    }
    Some(epoch) => epoch,
};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Exclusive bounds of a valid OA date: years 100 through 9999.
const OA_DATE_MIN: f64 = -657_435.0;
const OA_DATE_MAX: f64 = 2_958_466.0;

#[inline(always)]
fn oa_epoch() -> NaiveDateTime {
    OA_EPOCH.and_hms_opt(0, 0, 0).unwrap_or_default()
}

/// Converts a timestamp to an OLE Automation date: whole days since
/// 1899-12-30 plus the time of day as a fraction.
///
/// Before the epoch the integer part counts days backwards while the fraction
/// still counts forward from midnight, so `-1.25` is 1899-12-29 06:00.
/// Precision is one millisecond. Timestamps outside years 100 through 9999
/// have no OA date and are rejected.
pub fn to_oa_date(value: &NaiveDateTime) -> Result<f64, Error> {
    let mut millis = value.signed_duration_since(oa_epoch()).num_milliseconds();
    if millis < 0 {
        let frac = millis % MILLIS_PER_DAY;
        if frac != 0 {
            millis -= (MILLIS_PER_DAY + frac) * 2;
        }
    }
    let oa = millis as f64 / MILLIS_PER_DAY as f64;
    ensure!(
        oa > OA_DATE_MIN && oa < OA_DATE_MAX,
        "timestamp {} has no OA date",
        value
    );
    Ok(oa)
}

/// Inverse of [`to_oa_date`], rounding to the nearest millisecond.
pub fn from_oa_date(value: f64) -> Result<NaiveDateTime, Error> {
    ensure!(
        value > OA_DATE_MIN && value < OA_DATE_MAX,
        "OA date out of range: {}",
        value
    );
    let half = if value >= 0.0 { 0.5 } else { -0.5 };
    let mut millis = (value * MILLIS_PER_DAY as f64 + half) as i64;
    if millis < 0 {
        millis -= (millis % MILLIS_PER_DAY) * 2;
    }
    oa_epoch()
        .checked_add_signed(Duration::milliseconds(millis))
        .ok_or_else(|| Error::invalid_payload(format!("OA date out of range: {value}")))
}
