//! Test fixtures - reusable component sources.

/// Documented class component with propTypes and defaults
pub const ALERT: &str = r#"import React from 'react';
import PropTypes from 'prop-types';

/** Display a message to the user */
class Alert extends React.Component {
  render() {
    return <div className={this.props.type}>{this.props.message}</div>;
  }
}

Alert.propTypes = {
  /** Message to display */
  message: PropTypes.string.isRequired,

  /** Kind of alert */
  type: PropTypes.oneOf(['info', 'error']),
};

Alert.defaultProps = {
  type: 'info',
};

export default Alert;
"#;

/// Function component without props
pub const BUTTON: &str = r#"import React from 'react';

/** A clickable button */
export default function Button() {
  return <button />;
}
"#;

/// Example file for `Alert`
pub const EXAMPLE_ALERT: &str = r#"import React from 'react';
import Alert from 'ps-react/Alert';

/** Informational alert */
export default function ExampleAlert() {
  return <Alert message="Hello" />;
}
"#;

/// Source with no component definition at all
pub const NOT_A_COMPONENT: &str = "const helper = 42;\nexport const value = helper;\n";

/// Class component exported through a higher-order component
pub const STYLED_BUTTON: &str = r#"import React from 'react';
import PropTypes from 'prop-types';
import { withStyles } from '@material-ui/core/styles';

const styles = { root: { margin: 0 } };

/** Button with theme styles */
class Button extends React.Component {
  render() {
    return <button className={this.props.classes.root}>{this.props.label}</button>;
  }
}

Button.propTypes = {
  /** Text on the button */
  label: PropTypes.string.isRequired,
};

export default withStyles(styles)(Button);
"#;
