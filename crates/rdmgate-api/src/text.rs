// ── E1.20 text tables ──
//
// Human-readable names for enumerated fields in DEVICE_INFO,
// PRODUCT_DETAIL_ID_LIST and SENSOR_DEFINITION responses.

fn unknown(code: u16) -> String {
    format!("Unknown (0x{code:04x})")
}

/// Name of a product category (E1.20 table A-5).
pub fn product_category(code: u16) -> String {
    let name = match code {
        0x0000 => "Not declared",
        0x0100 => "Fixture",
        0x0101 => "Fixed fixture",
        0x0102 => "Moving yoke fixture",
        0x0103 => "Moving mirror fixture",
        0x01FF => "Fixture other",
        0x0200 => "Fixture accessory",
        0x0201 => "Fixture accessory color",
        0x0202 => "Fixture accessory yoke",
        0x0203 => "Fixture accessory mirror",
        0x0204 => "Fixture accessory effect",
        0x0205 => "Fixture accessory beam",
        0x02FF => "Fixture accessory other",
        0x0300 => "Projector",
        0x0301 => "Projector fixed",
        0x0302 => "Projector moving yoke",
        0x0303 => "Projector moving mirror",
        0x03FF => "Projector other",
        0x0400 => "Atmospheric",
        0x0401 => "Atmospheric effect",
        0x0402 => "Atmospheric pyro",
        0x04FF => "Atmospheric other",
        0x0500 => "Dimmer",
        0x0501 => "Dimmer AC incandescent",
        0x0502 => "Dimmer AC fluorescent",
        0x0503 => "Dimmer AC cold cathode",
        0x0504 => "Dimmer AC no-dim",
        0x0505 => "Dimmer AC ELV",
        0x0506 => "Dimmer AC other",
        0x0507 => "Dimmer DC level",
        0x0508 => "Dimmer DC PWM",
        0x0509 => "Dimmer CS LED",
        0x05FF => "Dimmer other",
        0x0600 => "Power",
        0x0601 => "Power control",
        0x0602 => "Power source",
        0x06FF => "Power other",
        0x0700 => "Scenic",
        0x0701 => "Scenic drive",
        0x07FF => "Scenic other",
        0x0800 => "Data",
        0x0801 => "Data distribution",
        0x0802 => "Data conversion",
        0x08FF => "Data other",
        0x0900 => "A/V",
        0x0901 => "A/V audio",
        0x0902 => "A/V video",
        0x09FF => "A/V other",
        0x0A00 => "Monitor",
        0x0A01 => "AC line power monitor",
        0x0A02 => "DC power monitor",
        0x0A03 => "Environmental monitor",
        0x0AFF => "Other monitor",
        0x7000 => "Control",
        0x7001 => "Controller PC",
        0x7002 => "Controller playback",
        0x7003 => "Controller fader",
        0x70FF => "Controller other",
        0x7100 => "Test",
        0x7101 => "Test equipment",
        0x71FF => "Test equipment other",
        0x7FFF => "Other",
        _ => return unknown(code),
    };
    name.to_owned()
}

/// Name of a product detail id (E1.20 table A-6); `None` for unknown ids.
pub fn product_detail(code: u16) -> Option<&'static str> {
    let name = match code {
        0x0000 => "Not declared",
        0x0001 => "Arc Lamp",
        0x0002 => "Metal Halide Lamp",
        0x0003 => "Incandescent Lamp",
        0x0004 => "LED",
        0x0005 => "Fluorescent",
        0x0006 => "Cold Cathode",
        0x0007 => "Electro-luminescent",
        0x0008 => "Laser",
        0x0009 => "Flash Tube",
        0x0100 => "Color Scroller",
        0x0101 => "Color Wheel",
        0x0102 => "Color Changer (Semaphore or other type)",
        0x0103 => "Iris",
        0x0104 => "Dimming Shuttle",
        0x0105 => "Profile Shuttle",
        0x0106 => "Barndoor Shuttle",
        0x0107 => "Effects Disc",
        0x0108 => "Gobo Rotator",
        0x0200 => "Video",
        0x0201 => "Slide",
        0x0202 => "Film",
        0x0203 => "Oil Wheel",
        0x0204 => "LCD Gate",
        0x0300 => "Fogger, Glycol",
        0x0301 => "Fogger, Mineral Oil",
        0x0302 => "Fogger, Water",
        0x0303 => "Dry Ice/ Carbon Dioxide Device",
        0x0304 => "Nitrogen based",
        0x0305 => "Bubble or Foam Machine",
        0x0306 => "Propane Flame",
        0x0307 => "Other Flame",
        0x0308 => "Scents",
        0x0309 => "Snow Machine",
        0x030A => "Water Jet",
        0x030B => "Wind Machine",
        0x030C => "Confetti Machine",
        0x030D => "Hazard",
        0x0400 => "Phase Control",
        0x0401 => "Phase Angle",
        0x0402 => "Sine",
        0x0403 => "PWM",
        0x0404 => "DC",
        0x0405 => "HF Ballast",
        0x0406 => "HFHV Neon/Argon",
        0x0407 => "HFHV Electroluminscent",
        0x0408 => "Metal Halide Ballast",
        0x0409 => "Bit Angle Modulation",
        0x040A => "Frequency Modulation",
        0x040B => "High Frequency 12V",
        0x040C => "Mechanical Relay",
        0x040D => "Electronic Relay",
        0x040E => "Electronic Switch",
        0x040F => "Contactor",
        0x0500 => "Mirror Ball Rotator",
        0x0501 => "Other Rotator",
        0x0502 => "Kabuki Drop",
        0x0503 => "Curtain",
        0x0504 => "Line Set",
        0x0505 => "Motor Control",
        0x0506 => "Damper Control",
        0x0600 => "Splitter",
        0x0601 => "Ethernet Node",
        0x0602 => "Merger",
        0x0603 => "Data Patch",
        0x0604 => "Wireless link",
        0x0701 => "Protocol Convertor",
        0x0702 => "Analog Demultiplex",
        0x0703 => "Analog Multiplex",
        0x0704 => "Switch Panel",
        0x0800 => "Router",
        0x0801 => "Fader",
        0x0802 => "Mixer",
        0x0900 => "Change Over Manual",
        0x0901 => "Change Over Auto",
        0x0902 => "Test Device",
        0x0A00 => "GFI / RCD Device",
        0x0A01 => "Battery",
        0x0A02 => "Controllable Breaker",
        0x7FFF => "Other Device",
        _ => return None,
    };
    Some(name)
}

/// Name of a sensor type (E1.20 table A-12).
pub fn sensor_type(code: u8) -> String {
    let name = match code {
        0x00 => "Temperature",
        0x01 => "Voltage",
        0x02 => "Current",
        0x03 => "Frequency",
        0x04 => "Resistance",
        0x05 => "Pressure",
        0x06 => "Mass",
        0x07 => "Length",
        0x08 => "Area",
        0x09 => "Volume",
        0x0A => "Density",
        0x0B => "Velocity",
        0x0C => "Acceleration",
        0x0D => "Force",
        0x0E => "Energy",
        0x0F => "Power",
        0x10 => "Time",
        0x11 => "Angle",
        0x12 => "Position X",
        0x13 => "Position Y",
        0x14 => "Position Z",
        0x15 => "Angular velocity",
        0x16 => "Luminous intensity",
        0x17 => "Luminous flux",
        0x18 => "Illuminance",
        0x19 => "Chrominance red",
        0x1A => "Chrominance green",
        0x1B => "Chrominance blue",
        0x1C => "Contacts",
        0x1D => "Memory",
        0x1E => "Items",
        0x1F => "Humidity",
        0x20 => "16 bit counter",
        0x7F => "Other",
        _ => return unknown(u16::from(code)),
    };
    name.to_owned()
}

/// Symbol for a measurement unit (E1.20 table A-13). Empty for `NONE`.
pub fn unit(code: u8) -> &'static str {
    match code {
        0x01 => "C",
        0x02 => "V DC",
        0x03 => "V AC Peak",
        0x04 => "V AC RMS",
        0x05 => "A DC",
        0x06 => "A AC Peak",
        0x07 => "A AC RMS",
        0x08 => "Hz",
        0x09 => "ohms",
        0x0A => "W",
        0x0B => "kg",
        0x0C => "m",
        0x0D => "m^2",
        0x0E => "m^3",
        0x0F => "kg/m^3",
        0x10 => "m/s",
        0x11 => "m/s^2",
        0x12 => "newton",
        0x13 => "joule",
        0x14 => "pascal",
        0x15 => "second",
        0x16 => "degree",
        0x17 => "steradian",
        0x18 => "candela",
        0x19 => "lumen",
        0x1A => "lux",
        0x1B => "ire",
        0x1C => "bytes",
        _ => "",
    }
}

/// Name of a unit prefix (E1.20 table A-14). Empty for `NONE`.
pub fn prefix(code: u8) -> &'static str {
    match code {
        0x01 => "Deci",
        0x02 => "Centi",
        0x03 => "Milli",
        0x04 => "Micro",
        0x05 => "Nano",
        0x06 => "Pico",
        0x07 => "Femto",
        0x08 => "Atto",
        0x09 => "Zepto",
        0x0A => "Yocto",
        0x11 => "Deca",
        0x12 => "Hecto",
        0x13 => "Kilo",
        0x14 => "Mega",
        0x15 => "Giga",
        0x16 => "Tera",
        0x17 => "Peta",
        0x18 => "Exa",
        0x19 => "Zetta",
        0x1A => "Yotta",
        _ => "",
    }
}

/// Prefix and unit joined with a space, omitting empty parts.
pub fn scaled_unit(prefix_code: u8, unit_code: u8) -> String {
    [prefix(prefix_code), unit(unit_code)]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_are_rendered_not_dropped() {
        assert_eq!(product_category(0x1234), "Unknown (0x1234)");
        assert_eq!(sensor_type(0x55), "Unknown (0x0055)");
        assert_eq!(product_detail(0x1234), None);
    }

    #[test]
    fn scaled_unit_skips_empty_parts() {
        assert_eq!(scaled_unit(0x13, 0x0A), "Kilo W");
        assert_eq!(scaled_unit(0x00, 0x01), "C");
        assert_eq!(scaled_unit(0x00, 0x00), "");
    }
}
