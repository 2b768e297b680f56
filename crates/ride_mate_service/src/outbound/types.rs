/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/

use serde::{Deserialize, Serialize};

use crate::common::types::*;

// Forward search and reverse lookup share this shape, coordinates arrive as strings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PlaceResponse {
    pub display_name: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl PlaceResponse {
    pub fn point(&self) -> Option<Point> {
        let lat = self.lat.as_ref()?.parse::<f64>().ok()?;
        let lon = self.lon.as_ref()?.parse::<f64>().ok()?;
        Some(Point::new(lat, lon))
    }
}
