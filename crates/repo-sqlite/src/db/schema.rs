// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    tracks (id) {
        id -> Text,
        name -> Text,
        artist_id -> Nullable<Text>,
        artist_name -> Nullable<Text>,
        updated_at_ms -> BigInt,
    }
}

diesel::table! {
    playlist_tracks (playlist_id, position) {
        playlist_id -> Text,
        position -> Integer,
        track_id -> Text,
        snapshot_ms -> BigInt,
    }
}

diesel::table! {
    track_edges_seq (from_track_id, to_track_id) {
        from_track_id -> Text,
        to_track_id -> Text,
        weight -> BigInt,
    }
}

diesel::table! {
    track_cooccurrence (track_a_id, track_b_id) {
        track_a_id -> Text,
        track_b_id -> Text,
        weight -> BigInt,
    }
}

diesel::table! {
    dismissed_recommendations (context_id, track_id) {
        context_id -> Text,
        track_id -> Text,
        dismissed_ms -> BigInt,
    }
}
