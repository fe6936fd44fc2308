//! Shared XML payloads captured from BluOS players.
//!
//! These constants are used by multiple test modules to avoid duplication.

/// `/SyncStatus` of a player that neither follows nor leads.
pub const SYNC_STATUS_STANDALONE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SyncStatus icon="/images/players/N125_nt.png" volume="23" modelName="NODE" name="Office" model="N130" brand="Bluesound" etag="12" schemaVersion="32" syncStat="12" id="192.168.68.56:11000" mac="90:56:82:9F:01:11">
</SyncStatus>"#;

/// `/SyncStatus` of the kitchen player following the dining room.
pub const SYNC_STATUS_FOLLOWER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SyncStatus icon="/images/players/N125_nt.png" volume="31" modelName="NODE" name="Kitchen" model="N130" brand="Bluesound" etag="27" schemaVersion="32" syncStat="27" id="192.168.68.60:11000" mac="90:56:82:9F:01:12" group="Dining Room+Kitchen">
  <master port="11000">192.168.68.53</master>
</SyncStatus>"#;

/// `/SyncStatus` of the dining room leading two followers (one listed twice).
pub const SYNC_STATUS_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SyncStatus icon="/images/players/N125_nt.png" volume="40" modelName="NODE" name="Dining Room" model="N130" brand="Bluesound" etag="44" schemaVersion="32" syncStat="44" id="192.168.68.53:11000" mac="90:56:82:9F:01:10" group="Dining Room+Kitchen+Living Room">
  <slave id="192.168.68.60" port="11000"/>
  <slave id="192.168.68.64" port="11000"/>
  <slave id="192.168.68.60" port="11000"/>
</SyncStatus>"#;

/// `/Status` while playing.
pub const STATUS_PLAYING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<status etag="4e266c9fbfba6d13d1a4d6ff4bd2e1e6">
  <album>Kind of Blue</album>
  <artist>Miles Davis</artist>
  <canMovePlayback>true</canMovePlayback>
  <name>So What</name>
  <service>Capture</service>
  <state>play</state>
  <volume>40</volume>
</status>"#;

/// `/RadioBrowse?service=Capture` on the player with the turntable attached.
pub const CAPTURE_BROWSE_WITH_TURNTABLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<radiotime service="Capture">
  <item URL="Capture%3Abluez%3Abluetooth" image="/images/BluetoothIcon.png" text="Bluetooth" inputType="bluetooth" id="bluetooth" type="audio"/>
  <item URL="Capture%3Ahw%3A1%2C0%2F1%2F25%2F2%3Fid%3Dinput1" image="/images/capture/ic_opticalinput.png" text="Optical Input" inputType="spdif" id="input1" type="audio"/>
  <item URL="Capture%3Ahw%3A1%2C0%2F1%2F25%2F2%3Fid%3Dinput2" image="/images/capture/ic_analoginput.png" text="Record Player" inputType="analog" id="input2" type="audio"/>
</radiotime>"#;

/// `/RadioBrowse?service=Capture` on a player without a turntable.
pub const CAPTURE_BROWSE_NO_TURNTABLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<radiotime service="Capture">
  <item URL="Capture%3Abluez%3Abluetooth" image="/images/BluetoothIcon.png" text="Bluetooth" inputType="bluetooth" id="bluetooth" type="audio"/>
  <item URL="Capture%3Ahw%3A1%2C0%2F1%2F25%2F2%3Fid%3Dinput1" image="/images/capture/ic_opticalinput.png" text="Optical Input" inputType="spdif" id="input1" type="audio"/>
</radiotime>"#;

/// `/RadioBrowse?service=Capture` from firmware that groups inputs by category.
pub const CAPTURE_BROWSE_NESTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<radiotime service="Capture">
  <category text="Inputs">
    <item URL="Capture%3Ahw%3A1%2C0%2F1%2F25%2F2%3Fid%3Dinput1" text="Optical Input" type="audio"/>
    <item URL="Capture%3Ahw%3A1%2C0%2F1%2F25%2F2%3Fid%3Dinput2" text="Record Player" type="audio"/>
  </category>
</radiotime>"#;
