/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use crate::common::{tiles::TileRef, types::*};
use serde::{Deserialize, Serialize};

/// Viewport and zoom overrides, the configured defaults apply to whatever is left out.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default)]
#[serde(rename_all = "camelCase")]
pub struct ViewQuery {
    pub zoom: Option<u8>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub point: Point,
    pub center: Point,
    #[serde(flatten)]
    pub view: ViewQuery,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UnprojectRequest {
    pub pixel: PixelPoint,
    pub center: Point,
    #[serde(flatten)]
    pub view: ViewQuery,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TilesQuery {
    pub lat: f64,
    pub lon: f64,
    pub zoom: Option<u8>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

// Query strings cannot go through `#[serde(flatten)]`, numbers would arrive as strings
impl TilesQuery {
    pub fn view(&self) -> ViewQuery {
        ViewQuery {
            zoom: self.zoom,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    pub tile: TileRef,
    pub url: String,
    pub offset: PixelPoint,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TilesResponse {
    pub center: Point,
    pub zoom: Zoom,
    pub viewport: Viewport,
    pub tiles: Vec<TileView>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub point: Point,
    pub pixel: PixelPoint,
}

/// Everything needed to draw the map for a session: tiles plus marker positions.
#[derive(Deserialize, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapViewResponse {
    pub center: Point,
    pub zoom: Zoom,
    pub viewport: Viewport,
    pub tiles: Vec<TileView>,
    pub pickup: Option<Marker>,
    pub drop: Option<Marker>,
    pub driver: Option<Marker>,
}
